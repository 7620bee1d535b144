//! Author legend
//!
//! One row per author in the color scale's domain, stacked 20px apart along
//! the right edge of the plot area.

use super::svg::{fmt_num, translate, SvgNode};
use crate::scale::OrdinalScale;

pub const LEGEND_ROW_HEIGHT: f64 = 20.0;
pub const SWATCH_SIZE: f64 = 18.0;

pub fn render_legend(colors: &OrdinalScale, plot_width: f64) -> Vec<SvgNode> {
    colors
        .domain()
        .iter()
        .enumerate()
        .map(|(i, author)| {
            let fill = colors.get(author).unwrap_or("black");
            let name = if author.is_empty() { "(unknown)" } else { author.as_str() };
            SvgNode::new("g")
                .attr("class", "legend")
                .attr("transform", translate(0.0, i as f64 * LEGEND_ROW_HEIGHT))
                .child(
                    SvgNode::new("rect")
                        .attr("x", fmt_num(plot_width - SWATCH_SIZE))
                        .attr("width", fmt_num(SWATCH_SIZE))
                        .attr("height", fmt_num(SWATCH_SIZE))
                        .attr("style", format!("fill: {};", fill)),
                )
                .child(
                    SvgNode::new("text")
                        .attr("x", fmt_num(plot_width - 24.0))
                        .attr("y", 9)
                        .attr("dy", ".35em")
                        .attr("style", "text-anchor: end;")
                        .with_text(name),
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_domain_order() {
        let colors = OrdinalScale::category20().with_domain(["b", "a", ""]);
        let rows = render_legend(&colors, 900.0);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].get_attr("transform"), Some("translate(0,20)"));
        assert_eq!(rows[0].children[0].get_attr("x"), Some("882"));
        assert_eq!(rows[0].children[1].get_attr("x"), Some("876"));
        assert_eq!(rows[1].children[1].text.as_deref(), Some("a"));
        assert_eq!(rows[2].children[1].text.as_deref(), Some("(unknown)"));
    }
}
