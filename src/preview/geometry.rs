//! Fitting an embedded page into its container.
//!
//! Live previews render the remote page at a fixed virtual resolution and
//! shrink it with a CSS transform, letterboxed and centered in the card. The
//! modal instead stretches the iframe over its viewport so the page can lay
//! itself out responsively.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_laid_out(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// The virtual resolution the viewer is rendered at before scaling.
    pub resolution: Size,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerStyle {
    Scaled(ScaledFit),
    Stretched,
}

impl ViewerStyle {
    /// CSS declarations to set on the viewer element, in application order.
    pub fn declarations(&self) -> [(&'static str, String); 5] {
        match self {
            ViewerStyle::Scaled(fit) => [
                ("width", format!("{}px", fit.resolution.width)),
                ("height", format!("{}px", fit.resolution.height)),
                ("transform", format!("scale({})", fit.scale)),
                ("left", format!("{}px", fit.offset_x)),
                ("top", format!("{}px", fit.offset_y)),
            ],
            ViewerStyle::Stretched => [
                ("width", "100%".to_string()),
                ("height", "100%".to_string()),
                ("left", "0".to_string()),
                ("top", "0".to_string()),
                ("transform", "none".to_string()),
            ],
        }
    }
}

/// Letterbox `resolution` inside `container`. Returns `None` while the
/// container has no usable size yet; the caller retries later.
pub fn fit_scaled(container: Size, resolution: Size) -> Option<ScaledFit> {
    if !container.is_laid_out() || !resolution.is_laid_out() {
        return None;
    }

    let scale = (container.width / resolution.width).min(container.height / resolution.height);
    let scaled_width = resolution.width * scale;
    let scaled_height = resolution.height * scale;

    Some(ScaledFit {
        scale,
        // Rounding in `resolution * scale` can overshoot the container by an ulp.
        offset_x: ((container.width - scaled_width) / 2.0).max(0.0),
        offset_y: ((container.height - scaled_height) / 2.0).max(0.0),
        resolution,
    })
}

pub fn fit_stretched() -> ViewerStyle {
    ViewerStyle::Stretched
}
