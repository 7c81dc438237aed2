//! Theme tokens
//!
//! Two static token sets, resolved purely from the dark-mode flag. No
//! state lives here; hosts read the tokens and render.

/// Color tokens, as hex strings the host maps to its color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTokens {
    /// Screen background
    pub background: &'static str,
    /// Card and sheet surfaces
    pub surface: &'static str,
    /// Primary text
    pub text: &'static str,
    /// Secondary text
    pub text_secondary: &'static str,
    /// Brand primary
    pub primary: &'static str,
    /// Accent highlights
    pub accent: &'static str,
    /// Destructive actions and errors
    pub danger: &'static str,
    /// Hairlines and dividers
    pub border: &'static str,
    /// The active like button
    pub like: &'static str,
}

/// Type scale, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypographyTokens {
    /// Large titles
    pub title: f32,
    /// Section headings
    pub heading: f32,
    /// Body copy
    pub body: f32,
    /// Captions and metadata
    pub caption: f32,
}

/// Spacing scale, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingTokens {
    /// Extra small
    pub xs: f32,
    /// Small
    pub sm: f32,
    /// Medium
    pub md: f32,
    /// Large
    pub lg: f32,
    /// Extra large
    pub xl: f32,
}

/// Corner radii, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusTokens {
    /// Inputs and chips
    pub sm: f32,
    /// Cards
    pub md: f32,
    /// Sheets and modals
    pub lg: f32,
    /// Fully rounded (avatars, pills)
    pub pill: f32,
}

/// A complete token set for one appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Whether this is the dark set
    pub dark: bool,
    /// Colors
    pub colors: ColorTokens,
    /// Type scale
    pub typography: TypographyTokens,
    /// Spacing scale
    pub spacing: SpacingTokens,
    /// Corner radii
    pub radius: RadiusTokens,
}

const TYPOGRAPHY: TypographyTokens = TypographyTokens {
    title: 28.0,
    heading: 20.0,
    body: 16.0,
    caption: 12.0,
};

const SPACING: SpacingTokens = SpacingTokens {
    xs: 4.0,
    sm: 8.0,
    md: 16.0,
    lg: 24.0,
    xl: 32.0,
};

const RADIUS: RadiusTokens = RadiusTokens {
    sm: 8.0,
    md: 12.0,
    lg: 16.0,
    pill: 999.0,
};

static LIGHT: Theme = Theme {
    dark: false,
    colors: ColorTokens {
        background: "#FFFFFF",
        surface: "#F7F7F8",
        text: "#1A1A2E",
        text_secondary: "#6B7280",
        primary: "#0EA5A4",
        accent: "#F59E0B",
        danger: "#DC2626",
        border: "#E5E7EB",
        like: "#EF4444",
    },
    typography: TYPOGRAPHY,
    spacing: SPACING,
    radius: RADIUS,
};

static DARK: Theme = Theme {
    dark: true,
    colors: ColorTokens {
        background: "#0F1115",
        surface: "#1A1D24",
        text: "#F3F4F6",
        text_secondary: "#9CA3AF",
        primary: "#14B8A6",
        accent: "#FBBF24",
        danger: "#F87171",
        border: "#2A2E37",
        like: "#F87171",
    },
    typography: TYPOGRAPHY,
    spacing: SPACING,
    radius: RADIUS,
};

impl Theme {
    /// Resolve the token set for an appearance.
    pub fn resolve(dark: bool) -> &'static Theme {
        if dark {
            &DARK
        } else {
            &LIGHT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_is_pure() {
        assert!(Theme::resolve(true).dark);
        assert!(!Theme::resolve(false).dark);
        assert!(std::ptr::eq(Theme::resolve(true), Theme::resolve(true)));
    }

    #[test]
    fn test_shared_scales() {
        // Only colors differ between appearances
        let light = Theme::resolve(false);
        let dark = Theme::resolve(true);
        assert_eq!(light.typography, dark.typography);
        assert_eq!(light.spacing, dark.spacing);
        assert_eq!(light.radius, dark.radius);
        assert_ne!(light.colors, dark.colors);
    }
}
