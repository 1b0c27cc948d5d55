use std::path::Path;

#[test]
fn demo_cases_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let demos = [
        "municipal_10k.yaml",
        "small_town_mgd.yaml",
        "dilute_inflow.json",
    ];

    for name in demos {
        let path = root.join(name);
        let case = ww_project::load_case(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        ww_project::validate_case(&case)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}
