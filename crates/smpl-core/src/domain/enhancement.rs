//! UI/UX enhancements the language model can weave into a description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Enhancement {
    ScrollAnimations,
    HoverEffects,
    GradientBackgrounds,
    TextAnimations,
    MicroInteractions,
    ModernLayouts,
}

impl Enhancement {
    pub const ALL: [Enhancement; 6] = [
        Self::ScrollAnimations,
        Self::HoverEffects,
        Self::GradientBackgrounds,
        Self::TextAnimations,
        Self::MicroInteractions,
        Self::ModernLayouts,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ScrollAnimations => "scroll-animations",
            Self::HoverEffects => "hover-effects",
            Self::GradientBackgrounds => "gradient-backgrounds",
            Self::TextAnimations => "text-animations",
            Self::MicroInteractions => "micro-interactions",
            Self::ModernLayouts => "modern-layouts",
        }
    }

    /// Sentence-case name, e.g. "Hover effects".
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ScrollAnimations => "Scroll animations",
            Self::HoverEffects => "Hover effects",
            Self::GradientBackgrounds => "Gradient backgrounds",
            Self::TextAnimations => "Text animations",
            Self::MicroInteractions => "Micro interactions",
            Self::ModernLayouts => "Modern layouts",
        }
    }

    /// What the model is told to add, in user-experience terms.
    pub const fn instructions(&self) -> &'static str {
        match self {
            Self::ScrollAnimations => {
                "Sections, cards and list items reveal smoothly as the user scrolls. \
                 Lists appear with a light stagger. Keep motion subtle and never distracting."
            }
            Self::HoverEffects => {
                "Cards, buttons, links and icons respond to hover with clear visual feedback \
                 through colour transitions, shadows or small transforms."
            }
            Self::GradientBackgrounds => {
                "Use gentle gradients, layered glass-like surfaces and gradient accents on key \
                 headings to add depth without overwhelming the content."
            }
            Self::TextAnimations => {
                "Hero text and main headings animate in on load. Changing text transitions \
                 smoothly. Calls to action get a restrained emphasis. Text stays readable."
            }
            Self::MicroInteractions => {
                "Controls react immediately to input. Focused fields show clear feedback and \
                 loading states animate to show progress."
            }
            Self::ModernLayouts => {
                "Responsive grids adapt to every screen size. Spacing and typography build a \
                 clear hierarchy. Alignment and padding stay consistent throughout."
            }
        }
    }

    /// Comma-separated list of every accepted identifier.
    pub fn supported() -> String {
        Self::ALL.map(|e| e.as_str()).join(", ")
    }
}

impl fmt::Display for Enhancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Enhancement {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| DomainError::UnsupportedEnhancement {
                enhancement: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_identifier() {
        for enhancement in Enhancement::ALL {
            assert_eq!(enhancement.as_str().parse::<Enhancement>().unwrap(), enhancement);
        }
        assert!(matches!(
            "parallax".parse::<Enhancement>(),
            Err(DomainError::UnsupportedEnhancement { .. })
        ));
    }

    #[test]
    fn serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Enhancement::MicroInteractions).unwrap(),
            r#""micro-interactions""#
        );
    }
}
