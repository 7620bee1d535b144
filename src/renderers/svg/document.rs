//! Drawing surface
//!
//! The root `<svg>` sized to the plot area plus margins, holding a single
//! plot group translated by the top-left margin. Axes, markers and the legend
//! are all appended to the plot group.

use super::elements::{fmt_num, translate, SvgNode, SVG_NAMESPACE};
use crate::models::config::ChartConfig;

/// Class carried by every marker circle
pub const MARKER_CLASS: &str = "dot";

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    root: SvgNode,
}

impl Surface {
    pub fn new(config: &ChartConfig) -> Self {
        let plot = SvgNode::new("g").attr(
            "transform",
            translate(config.margins.left, config.margins.top),
        );
        let root = SvgNode::new("svg")
            .attr("xmlns", SVG_NAMESPACE)
            .attr("width", fmt_num(config.outer_width()))
            .attr("height", fmt_num(config.outer_height()))
            .child(plot);

        Self {
            width: config.width,
            height: config.height,
            root,
        }
    }

    pub fn root(&self) -> &SvgNode {
        &self.root
    }

    pub fn plot(&self) -> &SvgNode {
        &self.root.children[0]
    }

    pub fn plot_mut(&mut self) -> &mut SvgNode {
        &mut self.root.children[0]
    }

    pub fn markers(&self) -> impl Iterator<Item = &SvgNode> {
        self.plot().children_with_class(MARKER_CLASS)
    }

    pub fn marker_count(&self) -> usize {
        self.markers().count()
    }

    /// Marker centers in surface order
    pub fn marker_positions(&self) -> Vec<(f64, f64)> {
        self.markers()
            .map(|m| {
                let coord = |name: &str| {
                    m.get_attr(name)
                        .and_then(|v| v.parse::<f64>().ok())
                        .unwrap_or(f64::NAN)
                };
                (coord("cx"), coord("cy"))
            })
            .collect()
    }

    pub fn to_markup(&self) -> String {
        self.root.to_markup()
    }
}
