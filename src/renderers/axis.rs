//! Axis rendering
//!
//! Builds an axis group (domain line, ticks with labels, and a title) for a
//! linear scale. Geometry matches the usual charting conventions: inner tick
//! length 6, label padding 3, outer ticks suppressed.

use super::svg::{fmt_num, translate, SvgNode};
use crate::scale::LinearScale;

pub const TICK_SIZE_INNER: f64 = 6.0;
pub const TICK_SIZE_OUTER: f64 = 0.0;
pub const TICK_PADDING: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

impl Orient {
    /// Direction ticks point away from the plot area
    fn k(self) -> f64 {
        match self {
            Orient::Bottom => 1.0,
            Orient::Left => -1.0,
        }
    }
}

/// Title drawn alongside an axis
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub dy: Option<String>,
    pub rotate: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct Axis {
    orient: Orient,
    ticks: usize,
    class: String,
    offset: (f64, f64),
    label: Option<AxisLabel>,
}

impl Axis {
    pub fn bottom(ticks: usize) -> Self {
        Self::new(Orient::Bottom, ticks, "x axis")
    }

    pub fn left(ticks: usize) -> Self {
        Self::new(Orient::Left, ticks, "y axis")
    }

    fn new(orient: Orient, ticks: usize, class: &str) -> Self {
        Self {
            orient,
            ticks,
            class: class.to_string(),
            offset: (0.0, 0.0),
            label: None,
        }
    }

    /// Position of the axis group within the plot area
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = (x, y);
        self
    }

    pub fn label(mut self, label: AxisLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn render(&self, scale: &LinearScale) -> SvgNode {
        let k = self.orient.k();
        let (r0, r1) = scale.range();
        let outer = k * TICK_SIZE_OUTER;
        let spacing = TICK_SIZE_INNER.max(0.0) + TICK_PADDING;

        let (anchor, domain_path) = match self.orient {
            Orient::Bottom => (
                "middle",
                format!("M{},{}V0H{}V{}", fmt_num(r0), fmt_num(outer), fmt_num(r1), fmt_num(outer)),
            ),
            Orient::Left => (
                "end",
                format!("M{},{}H0V{}H{}", fmt_num(outer), fmt_num(r0), fmt_num(r1), fmt_num(outer)),
            ),
        };

        let mut group = SvgNode::new("g")
            .attr("class", &self.class)
            .attr("fill", "none")
            .attr("font-size", 10)
            .attr("font-family", "sans-serif")
            .attr("text-anchor", anchor);
        if self.offset != (0.0, 0.0) {
            group.set_attr("transform", translate(self.offset.0, self.offset.1));
        }

        group.append(
            SvgNode::new("path")
                .attr("class", "domain")
                .attr("stroke", "currentColor")
                .attr("d", domain_path),
        );

        for (value, text) in scale.tick_labels(self.ticks) {
            let position = scale.map(value);
            let tick = match self.orient {
                Orient::Bottom => SvgNode::new("g")
                    .attr("class", "tick")
                    .attr("opacity", 1)
                    .attr("transform", translate(position, 0.0))
                    .child(
                        SvgNode::new("line")
                            .attr("stroke", "currentColor")
                            .attr("y2", fmt_num(k * TICK_SIZE_INNER)),
                    )
                    .child(
                        SvgNode::new("text")
                            .attr("fill", "currentColor")
                            .attr("y", fmt_num(k * spacing))
                            .attr("dy", "0.71em")
                            .with_text(text),
                    ),
                Orient::Left => SvgNode::new("g")
                    .attr("class", "tick")
                    .attr("opacity", 1)
                    .attr("transform", translate(0.0, position))
                    .child(
                        SvgNode::new("line")
                            .attr("stroke", "currentColor")
                            .attr("x2", fmt_num(k * TICK_SIZE_INNER)),
                    )
                    .child(
                        SvgNode::new("text")
                            .attr("fill", "currentColor")
                            .attr("x", fmt_num(k * spacing))
                            .attr("dy", "0.32em")
                            .with_text(text),
                    ),
            };
            group.append(tick);
        }

        if let Some(label) = &self.label {
            let mut title = SvgNode::new("text").attr("class", "label");
            if let Some(angle) = label.rotate {
                title.set_attr("transform", format!("rotate({})", fmt_num(angle)));
            }
            title.set_attr("x", fmt_num(label.x));
            title.set_attr("y", fmt_num(label.y));
            if let Some(dy) = &label.dy {
                title.set_attr("dy", dy);
            }
            title.set_attr("font-size", "1em");
            title.set_attr("style", "text-anchor: end; fill: black;");
            title.text = Some(label.text.clone());
            group.append(title);
        }

        group
    }
}
