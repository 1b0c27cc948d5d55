//! Process flow topology for diagrams.
//!
//! A derived view of one design: ordered process stages plus side streams,
//! each carrying the numbers a renderer should print. [`FlowTopology::to_dot`]
//! renders Graphviz DOT from the topology alone.

use serde::Serialize;
use ww_core::{InfluentSpec, Pollutant, UnitSystem, WaterQuality};
use ww_process::{SizingResult, Technology};
use ww_sim::SimulationResult;

use crate::display::{Quantity, SimulationDisplay, SizingDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StageId {
    Influent,
    Equalization,
    Anoxic,
    Aerobic,
    Clarifier,
    MembraneTank,
    Effluent,
}

impl StageId {
    /// Graph node name.
    pub fn node(self) -> &'static str {
        match self {
            StageId::Influent => "Influent",
            StageId::Equalization => "EQ",
            StageId::Anoxic => "Anoxic",
            StageId::Aerobic => "Aerobic",
            StageId::Clarifier => "Clarifier",
            StageId::MembraneTank => "MembraneTank",
            StageId::Effluent => "Effluent",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StageId::Influent => "Influent",
            StageId::Equalization => "Equalization",
            StageId::Anoxic => "Anoxic Zone",
            StageId::Aerobic => "Aerobic Zone",
            StageId::Clarifier => "Clarifier",
            StageId::MembraneTank => "Membrane Tank",
            StageId::Effluent => "Effluent",
        }
    }

    fn in_process_cluster(self) -> bool {
        matches!(
            self,
            StageId::Equalization | StageId::Anoxic | StageId::Aerobic
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SideStreamKind {
    Ras,
    Was,
    Alum,
    CarbonSource,
}

impl SideStreamKind {
    pub fn node(self) -> &'static str {
        match self {
            SideStreamKind::Ras => "RAS",
            SideStreamKind::Was => "WAS",
            SideStreamKind::Alum => "Alum",
            SideStreamKind::CarbonSource => "CarbonSource",
        }
    }

    fn is_chemical(self) -> bool {
        matches!(self, SideStreamKind::Alum | SideStreamKind::CarbonSource)
    }
}

/// A printed value on a stage or stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub label: &'static str,
    pub quantity: Quantity,
}

impl Annotation {
    fn new(label: &'static str, quantity: Quantity) -> Self {
        Self { label, quantity }
    }

    fn text(&self) -> String {
        let value = self.quantity.value;
        format!(
            "{}={:.*} {}",
            self.label,
            label_decimals(value),
            value,
            self.quantity.unit
        )
    }
}

/// One decimal from 1 upward; below that, enough to keep two significant
/// digits (a 0.04 MGD waste stream must not print as 0.0).
fn label_decimals(value: f64) -> usize {
    let magnitude = value.abs();
    if !magnitude.is_finite() || magnitude == 0.0 || magnitude >= 1.0 {
        return 1;
    }
    let leading_zeros = (-magnitude.log10().floor()) as usize;
    (leading_zeros + 1).min(6)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub id: StageId,
    pub annotations: Vec<Annotation>,
}

/// `from`/`to` are `None` where the stream leaves or enters the plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideStream {
    pub kind: SideStreamKind,
    pub from: Option<StageId>,
    pub to: Option<StageId>,
    pub annotation: Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowTopology {
    pub technology: Technology,
    /// Main path, in flow order
    pub stages: Vec<Stage>,
    pub side_streams: Vec<SideStream>,
}

fn quality_annotations(q: &WaterQuality) -> Vec<Annotation> {
    Pollutant::ALL
        .iter()
        .map(|p| Annotation::new(p.label(), Quantity::new(q.get(*p), "mg/L")))
        .collect()
}

impl FlowTopology {
    pub fn build(
        spec: &InfluentSpec,
        sizing: &SizingResult,
        sim: &SimulationResult,
        units: UnitSystem,
    ) -> Self {
        let size_view = SizingDisplay::new(sizing, units);
        let sim_view = SimulationDisplay::new(sim, units);
        let flow = Annotation::new(
            "Q",
            Quantity::new(units.flow(spec.flow_m3_day()), units.flow_label()),
        );

        let mut stages = Vec::new();

        let mut influent = vec![flow.clone()];
        influent.extend(quality_annotations(&spec.quality()));
        stages.push(Stage {
            id: StageId::Influent,
            annotations: influent,
        });

        stages.push(Stage {
            id: StageId::Equalization,
            annotations: vec![Annotation::new("Pump", sim_view.eq_pump.operating)],
        });

        let has_anoxic = sizing.technology.profile().has_anoxic_zone();
        if has_anoxic {
            stages.push(Stage {
                id: StageId::Anoxic,
                annotations: vec![Annotation::new("V", size_view.anoxic_volume)],
            });
        }

        let mut aerobic = vec![
            Annotation::new("V", size_view.aerobic_volume),
            Annotation::new("Air", sim_view.required_air),
        ];
        if let Some(media) = size_view.media_volume {
            aerobic.push(Annotation::new("Media", media));
        }
        stages.push(Stage {
            id: StageId::Aerobic,
            annotations: aerobic,
        });

        let separation = match (size_view.membrane_area, size_view.clarifier_area) {
            (Some(area), _) => Stage {
                id: StageId::MembraneTank,
                annotations: vec![Annotation::new("A", area)],
            },
            (None, Some(area)) => Stage {
                id: StageId::Clarifier,
                annotations: vec![Annotation::new("A", area)],
            },
            // settling step shown but not sized
            (None, None) => Stage {
                id: StageId::Clarifier,
                annotations: Vec::new(),
            },
        };
        let separation_id = separation.id;
        stages.push(separation);

        let mut effluent = vec![flow];
        effluent.extend(quality_annotations(&sim.effluent));
        stages.push(Stage {
            id: StageId::Effluent,
            annotations: effluent,
        });

        let first_bio = if has_anoxic {
            StageId::Anoxic
        } else {
            StageId::Aerobic
        };

        let mut side_streams = Vec::new();
        if sizing.sludge_return {
            side_streams.push(SideStream {
                kind: SideStreamKind::Was,
                from: Some(separation_id),
                to: None,
                annotation: Annotation::new("WAS", sim_view.was_flow),
            });
            side_streams.push(SideStream {
                kind: SideStreamKind::Ras,
                from: Some(separation_id),
                to: Some(first_bio),
                annotation: Annotation::new("RAS", sim_view.ras_flow),
            });
        }
        if spec.use_alum() && sim.alum_dose_kg_day > 0.0 {
            side_streams.push(SideStream {
                kind: SideStreamKind::Alum,
                from: None,
                to: Some(StageId::Aerobic),
                annotation: Annotation::new("Alum Dose", sim_view.alum_dose),
            });
        }
        if spec.use_carbon_source() && sim.carbon_dose_kg_day > 0.0 {
            side_streams.push(SideStream {
                kind: SideStreamKind::CarbonSource,
                from: None,
                to: Some(first_bio),
                annotation: Annotation::new("Carbon Dose", sim_view.carbon_dose),
            });
        }

        Self {
            technology: sizing.technology,
            stages,
            side_streams,
        }
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn side_stream(&self, kind: SideStreamKind) -> Option<&SideStream> {
        self.side_streams.iter().find(|s| s.kind == kind)
    }

    /// Graphviz DOT, left to right, process tanks clustered.
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        dot.push_str("digraph G {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=\"rounded,filled\", fillcolor=\"#EBF4FF\", fontname=\"Inter\"];\n");
        dot.push_str("  edge [fontname=\"Inter\", fontsize=10];\n");

        for stage in self.stages.iter().filter(|s| !s.id.in_process_cluster()) {
            dot.push_str(&format!("  {} [label=\"{}\"];\n", stage.id.node(), stage_label(stage)));
        }

        dot.push_str("  subgraph cluster_main {\n");
        dot.push_str(&format!("    label=\"{} Process\";\n", self.technology.code()));
        dot.push_str("    style=filled;\n");
        dot.push_str("    color=lightgrey;\n");
        for stage in self.stages.iter().filter(|s| s.id.in_process_cluster()) {
            dot.push_str(&format!("    {} [label=\"{}\"];\n", stage.id.node(), stage_label(stage)));
        }
        dot.push_str("  }\n");

        for pair in self.stages.windows(2) {
            dot.push_str(&format!("  {} -> {};\n", pair[0].id.node(), pair[1].id.node()));
        }

        for stream in &self.side_streams {
            let node = stream.kind.node();
            let text = stream.annotation.text().replace('=', "\\n");
            if stream.kind.is_chemical() {
                let fill = match stream.kind {
                    SideStreamKind::Alum => "#FEF3C7",
                    _ => "#D1FAE5",
                };
                dot.push_str(&format!("  {node} [shape=oval, fillcolor=\"{fill}\", label=\"{text}\"];\n"));
            } else {
                dot.push_str(&format!("  {node} [shape=plaintext, style=\"\", label=\"{node}\"];\n"));
            }
            if let Some(from) = stream.from {
                let label = if stream.to.is_none() { format!(", label=\"{text}\"") } else { String::new() };
                dot.push_str(&format!("  {} -> {node} [style=dashed{label}];\n", from.node()));
            }
            if let Some(to) = stream.to {
                let style = if stream.kind.is_chemical() {
                    String::new()
                } else {
                    format!(" [style=dashed, label=\"{text}\"]")
                };
                dot.push_str(&format!("  {node} -> {}{style};\n", to.node()));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

fn stage_label(stage: &Stage) -> String {
    let mut label = stage.id.title().to_string();
    for a in &stage.annotations {
        label.push_str("\\n");
        label.push_str(&a.text());
    }
    label
}
