//! Box sizing backed by inline style.
//!
//! There is no layout engine behind the tree, so dimensions are whatever
//! the inline style declares in pixels. Setters write `px` values; the
//! outer variants add padding and border on both sides.

use serde_json::Value;

use crate::Collection;

/// "120px" -> 120; unparseable or non-px values read as absent. The
/// number must touch its unit, as in CSS.
fn parse_px(value: &str) -> Option<i32> {
    value.trim().strip_suffix("px")?.parse().ok()
}

impl Collection {
    /// Inline content width of the first element, in pixels
    pub fn width(&self) -> Option<i32> {
        self.style_px("width")
    }

    /// Inline content height of the first element, in pixels
    pub fn height(&self) -> Option<i32> {
        self.style_px("height")
    }

    /// Width plus horizontal padding and borders
    pub fn outer_width(&self) -> Option<i32> {
        let width = self.style_px("width")?;
        Some(width + 2 * self.edge_px("padding") + 2 * self.edge_px("border-width"))
    }

    /// Height plus vertical padding and borders
    pub fn outer_height(&self) -> Option<i32> {
        let height = self.style_px("height")?;
        Some(height + 2 * self.edge_px("padding") + 2 * self.edge_px("border-width"))
    }

    /// Set the inline width of every element
    pub fn set_width(&self, px: i32) -> Collection {
        self.set(":width", Some(Value::from(format!("{px}px"))))
    }

    /// Set the inline height of every element
    pub fn set_height(&self, px: i32) -> Collection {
        self.set(":height", Some(Value::from(format!("{px}px"))))
    }

    fn style_px(&self, property: &str) -> Option<i32> {
        let node = self.first()?;
        let state = self.page().state();
        let element = state.doc.tree().element(node)?;
        element.style_get(&pin_style::resolve(property)).and_then(parse_px)
    }

    fn edge_px(&self, property: &str) -> i32 {
        self.style_px(property).unwrap_or(0)
    }
}
