//! Scroll-progress helpers used to drive reveal animations. Every function
//! maps a viewport position into `0.0..=1.0` or remaps such a progress value.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

impl ElementRect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

fn unit(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Top edge travelling from the viewport bottom to its middle.
pub fn scroll_progress(rect: ElementRect, viewport_height: f64) -> f64 {
    let start = viewport_height;
    let end = viewport_height * 0.5;
    unit(1.0 - (rect.top - end) / (start - end))
}

/// Element centre travelling from the viewport bottom to its centre.
pub fn center_progress(rect: ElementRect, viewport_height: f64) -> f64 {
    let start = viewport_height;
    let end = viewport_height / 2.0;
    unit(1.0 - (rect.center() - end) / (start - end))
}

/// Fraction of the element that has scrolled into view.
pub fn grid_progress(rect: ElementRect, viewport_height: f64) -> f64 {
    unit((viewport_height - rect.top) / rect.height)
}

/// Card reveal: completes once the card is centred in the viewport.
pub fn card_progress(rect: ElementRect, viewport_height: f64) -> f64 {
    let start = viewport_height;
    let end = viewport_height / 2.0 - rect.height / 2.0;
    unit((start - rect.top) / (start - end))
}

/// Map reveal: completes when the top reaches 30% of the viewport.
pub fn map_progress(rect: ElementRect, viewport_height: f64) -> f64 {
    let start = viewport_height;
    let end = viewport_height * 0.3;
    unit((start - rect.top) / (start - end))
}

/// Clamped linear remap of `progress` from `input` onto `output`.
pub fn transform_progress(progress: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_min, in_max) = input;
    let (out_min, out_max) = output;
    if progress <= in_min {
        return out_min;
    }
    if progress >= in_max {
        return out_max;
    }
    out_min + (progress - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Image scale for card reveals: 0.8 at rest, full size by 65% progress.
pub fn progress_to_scale(progress: f64) -> f64 {
    transform_progress(progress, (0.0, 0.65), (0.8, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn scroll_progress_spans_lower_half() {
        assert_eq!(scroll_progress(ElementRect::new(1000.0, 200.0), 800.0), 0.0);
        assert!(close(scroll_progress(ElementRect::new(600.0, 200.0), 800.0), 0.5));
        assert_eq!(scroll_progress(ElementRect::new(100.0, 200.0), 800.0), 1.0);
    }

    #[test]
    fn degenerate_geometry_stays_in_range() {
        assert_eq!(grid_progress(ElementRect::new(800.0, 0.0), 800.0), 0.0);
        assert_eq!(grid_progress(ElementRect::new(100.0, 0.0), 800.0), 1.0);
        assert_eq!(scroll_progress(ElementRect::new(10.0, 0.0), 0.0), 0.0);
    }

    #[test]
    fn card_and_map_progress() {
        assert!(close(card_progress(ElementRect::new(500.0, 200.0), 800.0), 0.6));
        assert!(close(map_progress(ElementRect::new(520.0, 50.0), 800.0), 0.5));
        assert!(close(center_progress(ElementRect::new(500.0, 200.0), 800.0), 0.5));
    }

    #[test]
    fn transform_is_clamped_linear() {
        assert_eq!(transform_progress(-1.0, (0.0, 1.0), (10.0, 20.0)), 10.0);
        assert_eq!(transform_progress(2.0, (0.0, 1.0), (10.0, 20.0)), 20.0);
        assert!(close(transform_progress(0.25, (0.0, 0.5), (1.0, 0.0)), 0.5));
        assert_eq!(transform_progress(0.5, (0.5, 0.5), (0.0, 1.0)), 0.0);
    }

    #[test]
    fn scale_reaches_full_size_early() {
        assert_eq!(progress_to_scale(0.0), 0.8);
        assert_eq!(progress_to_scale(0.7), 1.0);
        assert!(close(progress_to_scale(0.325), 0.9));
    }
}
