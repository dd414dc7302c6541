//! Minimal bar chart for dashboard canvases.
//!
//! Layout is computed in plain Rust ([`bar_layout`]); only [`draw`] touches
//! [`web_sys::CanvasRenderingContext2d`]. The chart is stateless: every call
//! clears the canvas and redraws from the payload.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use serde::Deserialize;

/// Inset between the canvas edge and the plot area.
pub const CHART_PADDING_PX: f64 = 40.0;
pub const DEFAULT_BAR_COLOR: &str = "#3b82f6";
pub const TEXT_COLOR: &str = "#374151";
pub const TEXT_FONT: &str = "12px Inter";

/// `{ type: "bar", labels: [...], values: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn is_bar(&self) -> bool {
        self.kind == "bar"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub color: Option<String>,
}

impl ChartStyle {
    pub fn bar_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_BAR_COLOR)
    }
}

/// One bar plus the anchor points for its caption and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: f64,
    /// Horizontal centre of the bar; both texts are centred on it.
    pub text_x: f64,
    pub label_y: f64,
    pub value_y: f64,
}

/// Bars for a `width` x `height` canvas, scaled to the largest value.
/// Returns nothing for non-bar payloads, empty data, or a non-positive
/// maximum.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_layout(data: &ChartData, width: f64, height: f64) -> Vec<Bar> {
    if !data.is_bar() {
        return Vec::new();
    }
    let slots = data.labels.len().max(data.values.len());
    let max_value = data.values.iter().copied().filter(|v| v.is_finite()).fold(f64::NEG_INFINITY, f64::max);
    if slots == 0 || max_value <= 0.0 {
        return Vec::new();
    }

    let chart_width = width - CHART_PADDING_PX * 2.0;
    let chart_height = height - CHART_PADDING_PX * 2.0;
    let slot_width = chart_width / slots as f64;
    let bar_width = slot_width * 0.8;
    let baseline = height - CHART_PADDING_PX;

    data.values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(index, &value)| {
            let bar_height = value / max_value * chart_height;
            let x = CHART_PADDING_PX + index as f64 * slot_width + slot_width * 0.1;
            let y = baseline - bar_height;
            Bar {
                x,
                y,
                width: bar_width,
                height: bar_height,
                label: data.labels.get(index).cloned().unwrap_or_default(),
                value,
                text_x: x + bar_width / 2.0,
                label_y: baseline + 20.0,
                value_y: y - 10.0,
            }
        })
        .collect()
}

/// Clear the context and draw the chart.
///
/// # Errors
///
/// Returns `Err` if a `Canvas2D` call fails.
#[cfg(feature = "hydrate")]
pub fn draw(
    ctx: &web_sys::CanvasRenderingContext2d,
    data: &ChartData,
    style: &ChartStyle,
    width: f64,
    height: f64,
) -> Result<(), wasm_bindgen::JsValue> {
    ctx.clear_rect(0.0, 0.0, width, height);
    for bar in bar_layout(data, width, height) {
        ctx.set_fill_style_str(style.bar_color());
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);

        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_font(TEXT_FONT);
        ctx.set_text_align("center");
        ctx.fill_text(&bar.label, bar.text_x, bar.label_y)?;
        ctx.fill_text(&bar.value.to_string(), bar.text_x, bar.value_y)?;
    }
    Ok(())
}
