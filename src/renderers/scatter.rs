//! Scatter plot renderer
//!
//! Turns a `Dataset` into marker circles on a `Surface`: x is lines added,
//! y is lines deleted. Scales are derived from the data extent on every call
//! to `compute_scales`; nothing is cached between loads.

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use super::axis::{Axis, AxisLabel};
use super::legend::render_legend;
use super::svg::{fmt_num, Surface, SvgNode, MARKER_CLASS};
use crate::errors::ChartResult;
use crate::models::commit::{CommitRecord, Dataset};
use crate::models::config::{ChartConfig, RenderMode};
use crate::scale::{LinearScale, OrdinalScale};

/// Attribute linking a marker back to its record position
pub const INDEX_ATTR: &str = "data-index";

/// Horizontal and vertical scales for one data load
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
}

/// What a render pass did to the surface
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub entered: usize,
    pub updated: usize,
    pub removed: usize,
}

#[derive(Clone, Debug)]
pub struct ScatterRenderer {
    config: ChartConfig,
}

impl ScatterRenderer {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Fresh surface with axes drawn against the empty-data domain
    pub fn initialize(&self) -> Surface {
        let mut surface = Surface::new(&self.config);
        let scales = self.compute_scales(&Dataset::default());
        self.draw_axes(&mut surface, &scales);
        surface
    }

    pub fn compute_scales(&self, dataset: &Dataset) -> Scales {
        let transform = self.config.transform;
        let x = LinearScale::from_extent(
            dataset.iter().map(|r| transform.apply(r.additions)),
            (0.0, self.config.width),
        );
        let y = LinearScale::from_extent(
            dataset.iter().map(|r| transform.apply(r.deletions)),
            (self.config.height, 0.0),
        );

        if x.is_degenerate() || y.is_degenerate() {
            log::debug!("collapsed domain: x={:?} y={:?}", x.domain(), y.domain());
        }
        Scales { x, y }
    }

    /// Marker center for one record
    pub fn position(&self, record: &CommitRecord, scales: &Scales) -> (f64, f64) {
        let transform = self.config.transform;
        (
            scales.x.map(transform.apply(record.additions)),
            scales.y.map(transform.apply(record.deletions)),
        )
    }

    /// Replace both axes, keeping them ahead of markers in paint order
    pub fn draw_axes(&self, surface: &mut Surface, scales: &Scales) {
        let width = self.config.width;
        let height = self.config.height;

        let x_axis = Axis::bottom(self.config.x_ticks)
            .offset(0.0, height)
            .label(AxisLabel {
                text: self.config.x_label.clone(),
                x: width / 2.0,
                y: 25.0,
                dy: None,
                rotate: None,
            })
            .render(&scales.x);
        let y_axis = Axis::left(self.config.y_ticks)
            .label(AxisLabel {
                text: self.config.y_label.clone(),
                x: -height / 2.0,
                y: -50.0,
                dy: Some(".71em".to_string()),
                rotate: Some(-90.0),
            })
            .render(&scales.y);

        let plot = surface.plot_mut();
        plot.remove_children(|c| c.has_class("axis"));
        plot.children.insert(0, y_axis);
        plot.children.insert(0, x_axis);
    }

    /// Draw markers for `dataset` according to the configured mode
    pub fn render(&self, surface: &mut Surface, dataset: &Dataset, scales: &Scales) -> RenderStats {
        let colors = self.colors(dataset);
        let stats = match self.config.mode {
            RenderMode::Append => self.append_markers(surface, dataset, scales, colors.as_ref()),
            RenderMode::Reconcile => self.reconcile_markers(surface, dataset, scales, colors.as_ref()),
        };

        if let Some(colors) = &colors {
            if self.config.show_legend {
                let plot = surface.plot_mut();
                plot.remove_children(|c| c.has_class("legend"));
                plot.children.extend(render_legend(colors, self.config.width));
            }
        }

        log::debug!(
            "render: entered={} updated={} removed={} total={}",
            stats.entered,
            stats.updated,
            stats.removed,
            surface.marker_count()
        );
        stats
    }

    /// Scales, axes and markers in one pass
    pub fn draw(&self, surface: &mut Surface, dataset: &Dataset) -> (Scales, RenderStats) {
        let scales = self.compute_scales(dataset);
        self.draw_axes(surface, &scales);
        let stats = self.render(surface, dataset, &scales);
        (scales, stats)
    }

    /// One new marker per record, whatever is already drawn
    pub fn append_markers(
        &self,
        surface: &mut Surface,
        dataset: &Dataset,
        scales: &Scales,
        colors: Option<&OrdinalScale>,
    ) -> RenderStats {
        let plot = surface.plot_mut();
        for (index, record) in dataset.iter().enumerate() {
            plot.append(self.marker(index, record, scales, colors));
        }
        RenderStats {
            entered: dataset.len(),
            ..RenderStats::default()
        }
    }

    /// Keyed by record index: update drawn markers, add missing, drop surplus
    pub fn reconcile_markers(
        &self,
        surface: &mut Surface,
        dataset: &Dataset,
        scales: &Scales,
        colors: Option<&OrdinalScale>,
    ) -> RenderStats {
        let records = dataset.records();
        let mut stats = RenderStats::default();
        let mut seen = vec![false; records.len()];

        let plot = surface.plot_mut();
        stats.removed = plot.remove_children(|c| {
            if !c.has_class(MARKER_CLASS) {
                return false;
            }
            match marker_index(c) {
                Some(i) if i < seen.len() && !seen[i] => {
                    seen[i] = true;
                    false
                }
                _ => true,
            }
        });

        for node in plot.children.iter_mut().filter(|c| c.has_class(MARKER_CLASS)) {
            if let Some(index) = marker_index(node) {
                let fresh = self.marker(index, &records[index], scales, colors);
                for (name, value) in fresh.attrs() {
                    node.set_attr(name, value);
                }
                stats.updated += 1;
            }
        }

        for (index, record) in records.iter().enumerate() {
            if !seen[index] {
                plot.append(self.marker(index, record, scales, colors));
                stats.entered += 1;
            }
        }

        stats
    }

    /// Remove every marker; returns how many were removed
    pub fn clear(&self, surface: &mut Surface) -> usize {
        surface.plot_mut().remove_children(|c| c.has_class(MARKER_CLASS))
    }

    /// Tooltip body for a hovered marker: `author<br/> (additions, deletions)`
    pub fn tooltip_html(&self, record: &CommitRecord) -> String {
        format!(
            "{}<br/> ({}, {})",
            escape(record.author.as_str()),
            fmt_num(record.additions),
            fmt_num(record.deletions)
        )
    }

    fn colors(&self, dataset: &Dataset) -> Option<OrdinalScale> {
        if !self.config.color_by_author {
            return None;
        }
        Some(OrdinalScale::category20().with_domain(dataset.authors()))
    }

    fn marker(
        &self,
        index: usize,
        record: &CommitRecord,
        scales: &Scales,
        colors: Option<&OrdinalScale>,
    ) -> SvgNode {
        let (cx, cy) = self.position(record, scales);
        let fill = colors
            .and_then(|c| c.get(&record.author))
            .unwrap_or(self.config.fill.as_str());
        SvgNode::new("circle")
            .attr("class", MARKER_CLASS)
            .attr("r", fmt_num(self.config.radius))
            .attr("cx", fmt_num(cx))
            .attr("cy", fmt_num(cy))
            .attr("style", format!("fill: {};", fill))
            .attr(INDEX_ATTR, index)
    }
}

/// Record position a marker was drawn for
pub fn marker_index(node: &SvgNode) -> Option<usize> {
    node.get_attr(INDEX_ATTR).and_then(|v| v.parse().ok())
}
