/// Straight (non-premultiplied) color with channels in 0.0..=1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    pub fn from_rgb8((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }
}

/// CSS-style `hsl(hue, saturation%, lightness%)`.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Rgba {
    hsla(hue, saturation, lightness, 1.0)
}

/// CSS-style `hsla(hue, saturation%, lightness%, alpha)`.
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let l = (lightness / 100.0).clamp(0.0, 1.0);
    let h = hue.rem_euclid(360.0) / 30.0;

    // Same formulation as the CSS Color 4 reference conversion
    let a = s * l.min(1.0 - l);
    let channel = |n: f32| {
        let k = (n + h) % 12.0;
        l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };

    Rgba::new(channel(0.0), channel(8.0), channel(4.0), alpha.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-4
            && (a.g - b.g).abs() < 1e-4
            && (a.b - b.b).abs() < 1e-4
            && (a.a - b.a).abs() < 1e-4
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl(0.0, 100.0, 50.0), Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(hsl(120.0, 100.0, 50.0), Rgba::new(0.0, 1.0, 0.0, 1.0)));
        assert!(close(hsl(240.0, 100.0, 50.0), Rgba::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn lightness_extremes() {
        assert!(close(hsl(200.0, 100.0, 100.0), Rgba::new(1.0, 1.0, 1.0, 1.0)));
        assert!(close(hsl(200.0, 100.0, 0.0), Rgba::new(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn hue_wraps_around() {
        assert!(close(hsl(360.0, 100.0, 50.0), hsl(0.0, 100.0, 50.0)));
        assert!(close(hsl(-120.0, 100.0, 50.0), hsl(240.0, 100.0, 50.0)));
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(hsla(30.0, 100.0, 60.0, 1.7).a, 1.0);
        assert_eq!(hsla(30.0, 100.0, 60.0, -0.2).a, 0.0);
    }
}
