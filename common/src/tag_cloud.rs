//! Weighting of tag cloud entries (`.tagcloud a[data-size]`) in rendered results.

/// Entries never fade out completely.
pub const MIN_OPACITY: f64 = 0.3;

/// Opacity of an entry of weight `size` in a cloud whose heaviest entry is `max`.
pub fn tag_opacity(size: f64, max: f64) -> f64 {
    if !(max > 0.0) || !size.is_finite() || size <= 0.0 {
        return MIN_OPACITY;
    }
    (size / max).sqrt().clamp(MIN_OPACITY, 1.0)
}

pub fn tag_cloud_opacities(sizes: &[f64]) -> Vec<f64> {
    let max = sizes.iter().copied().filter(|size| size.is_finite()).fold(f64::NEG_INFINITY, f64::max);
    sizes.iter().map(|size| tag_opacity(*size, max)).collect()
}

/// Tooltip for an entry when the cloud carries `data-valprefix`.
pub fn tag_title(value_prefix: Option<&str>, size_text: &str) -> Option<String> {
    value_prefix.filter(|prefix| !prefix.is_empty()).map(|prefix| format!("{}{}", prefix, size_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heaviest_entry_is_opaque_and_light_entries_are_floored() {
        let opacities = tag_cloud_opacities(&[4.0, 1.0, 0.01]);
        assert_eq!(opacities[0], 1.0);
        assert_eq!(opacities[1], 0.5);
        assert_eq!(opacities[2], MIN_OPACITY);
    }

    #[test]
    fn degenerate_weights_get_the_floor() {
        assert_eq!(tag_cloud_opacities(&[0.0, 0.0]), vec![MIN_OPACITY, MIN_OPACITY]);
        assert_eq!(tag_opacity(f64::NAN, 1.0), MIN_OPACITY);
        assert!(tag_cloud_opacities(&[]).is_empty());
    }

    #[test]
    fn title_uses_prefix_when_present() {
        assert_eq!(tag_title(Some("p = "), "0.25"), Some("p = 0.25".to_string()));
        assert_eq!(tag_title(Some(""), "0.25"), None);
        assert_eq!(tag_title(None, "0.25"), None);
    }
}
