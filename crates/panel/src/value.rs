use crate::panel::PanelError;
use cubestage_common::Color;
use std::fmt;

/// Widget shape of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    Color,
    Slider { min: f32, max: f32 },
    Toggle,
}

impl ControlKind {
    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Color => "color",
            ControlKind::Slider { .. } => "number",
            ControlKind::Toggle => "bool",
        }
    }
}

/// Value carried by a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Color(Color),
    Number(f32),
    Bool(bool),
}

impl ControlValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ControlValue::Color(_) => "color",
            ControlValue::Number(_) => "number",
            ControlValue::Bool(_) => "bool",
        }
    }

    /// Parse user text for a control of `kind`.
    pub fn parse(kind: ControlKind, input: &str) -> Result<Self, PanelError> {
        let text = input.trim();
        let parse_err = |reason: String| PanelError::Parse {
            input: input.to_string(),
            reason,
        };
        match kind {
            ControlKind::Color => Color::parse(text)
                .map(ControlValue::Color)
                .map_err(|e| parse_err(e.to_string())),
            ControlKind::Slider { .. } => text
                .parse::<f32>()
                .map(ControlValue::Number)
                .map_err(|e| parse_err(e.to_string())),
            ControlKind::Toggle => match text.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(ControlValue::Bool(true)),
                "false" | "off" | "no" | "0" => Ok(ControlValue::Bool(false)),
                _ => Err(parse_err("expected true or false".into())),
            },
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Color(c) => write!(f, "{c}"),
            ControlValue::Number(n) => write!(f, "{n}"),
            ControlValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_each_kind() {
        assert_eq!(
            ControlValue::parse(ControlKind::Color, "#00ff00").unwrap(),
            ControlValue::Color(Color::from_hex(0x00ff00))
        );
        assert_eq!(
            ControlValue::parse(ControlKind::Slider { min: 0.0, max: 10.0 }, " 7 ").unwrap(),
            ControlValue::Number(7.0)
        );
        assert_eq!(
            ControlValue::parse(ControlKind::Toggle, "off").unwrap(),
            ControlValue::Bool(false)
        );
    }

    #[test]
    fn parse_errors_keep_input() {
        let err = ControlValue::parse(ControlKind::Toggle, "maybe").unwrap_err();
        assert!(matches!(err, PanelError::Parse { ref input, .. } if input == "maybe"));
        assert!(ControlValue::parse(ControlKind::Slider { min: 0.0, max: 1.0 }, "x").is_err());
    }
}
