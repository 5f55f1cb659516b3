use std::collections::HashMap;

/// A built-in keyboard shortcut with its default accelerator.
pub struct BuiltinKeybinding {
    pub id: &'static str,
    pub description: &'static str,
    pub default_accel: &'static str,
}

pub const BUILTIN_KEYBINDINGS: &[BuiltinKeybinding] = &[
    BuiltinKeybinding {
        id: "go_back",
        description: "Back",
        default_accel: "<Alt>Left",
    },
    // XF86Back, the dedicated back key on some keyboards
    BuiltinKeybinding {
        id: "go_back_key",
        description: "Back (media key)",
        default_accel: "Back",
    },
];

/// Ids of every binding that raises a back request.
pub const BACK_KEYBINDINGS: &[&str] = &["go_back", "go_back_key"];

/// Returns the GTK accel string for a given keybinding ID, using the override
/// if present, otherwise the built-in default.
pub fn get_accel(id: &str, overrides: &HashMap<String, String>) -> String {
    if let Some(display_str) = overrides.get(id) {
        let accel = parse_keybinding_to_accel(display_str);
        if !accel.is_empty() {
            return accel;
        }
        log::warn!("Ignoring invalid keybinding override {} = {:?}", id, display_str);
    }
    BUILTIN_KEYBINDINGS
        .iter()
        .find(|kb| kb.id == id)
        .map(|kb| kb.default_accel.to_string())
        .unwrap_or_default()
}

/// Split `"<Ctrl><Shift>b"` into its modifier names and the trailing key.
fn split_accel(accel: &str) -> (Vec<&str>, &str) {
    let mut modifiers = Vec::new();
    let mut rest = accel;
    while let Some(stripped) = rest.strip_prefix('<') {
        let Some(end) = stripped.find('>') else {
            break;
        };
        modifiers.push(&stripped[..end]);
        rest = &stripped[end + 1..];
    }
    (modifiers, rest)
}

/// Canonical display name of a modifier, if it is one we know.
fn modifier_name(modifier: &str) -> Option<&'static str> {
    match modifier.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some("Ctrl"),
        "shift" => Some("Shift"),
        "alt" => Some("Alt"),
        "super" => Some("Super"),
        _ => None,
    }
}

/// Converts a GTK accel string like `"<Alt>Left"` to a human-readable
/// display string like `"Alt+Left"`.
pub fn accel_to_display(accel: &str) -> String {
    let (modifiers, key) = split_accel(accel);
    let mut parts: Vec<&str> = modifiers
        .into_iter()
        .map(|m| modifier_name(m).unwrap_or(m))
        .collect();
    if !key.is_empty() {
        parts.push(match key {
            "Escape" => "Esc",
            "BackSpace" => "Backspace",
            other => other,
        });
    }
    parts.join("+")
}

/// Converts a human-readable keybinding string like `"Alt+Left"` into a
/// GTK accelerator string like `"<Alt>Left"`. Returns an empty string for
/// unknown modifiers.
pub fn parse_keybinding_to_accel(key: &str) -> String {
    let parts: Vec<&str> = key.split('+').collect();
    let Some((last, modifiers)) = parts.split_last() else {
        return String::new();
    };
    let mut accel = String::new();
    for part in modifiers {
        let Some(name) = modifier_name(part.trim()) else {
            return String::new();
        };
        accel.push('<');
        accel.push_str(name);
        accel.push('>');
    }
    let key = match last.trim() {
        "Esc" => "Escape",
        "Backspace" => "BackSpace",
        other => other,
    };
    if key.is_empty() {
        return String::new();
    }
    accel.push_str(key);
    accel
}

/// Parsed representation of a keybinding for efficient matching in event handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAccel {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub super_: bool,
    /// The lowercase key name (e.g. "left", "escape")
    pub key_lower: String,
}

impl ParsedAccel {
    /// Compare against a pressed key, given its GDK name and modifier state.
    pub fn matches(
        &self,
        key_name: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        super_: bool,
    ) -> bool {
        ctrl == self.ctrl
            && shift == self.shift
            && alt == self.alt
            && super_ == self.super_
            && key_name.eq_ignore_ascii_case(&self.key_lower)
    }
}

/// Parse a GTK accel string like `"<Alt>Left"` into a `ParsedAccel`.
/// Unknown modifiers are ignored.
pub fn parse_accel(accel: &str) -> Option<ParsedAccel> {
    let (modifiers, key) = split_accel(accel);
    if key.is_empty() {
        return None;
    }
    let mut parsed = ParsedAccel {
        ctrl: false,
        shift: false,
        alt: false,
        super_: false,
        key_lower: key.to_lowercase(),
    };
    for modifier in modifiers.into_iter().filter_map(modifier_name) {
        match modifier {
            "Ctrl" => parsed.ctrl = true,
            "Shift" => parsed.shift = true,
            "Alt" => parsed.alt = true,
            _ => parsed.super_ = true,
        }
    }
    Some(parsed)
}

/// Human-readable summary of the back bindings, e.g. `"Back: Alt+Left"`.
pub fn describe_back_bindings(overrides: &HashMap<String, String>) -> Vec<String> {
    BUILTIN_KEYBINDINGS
        .iter()
        .filter(|kb| BACK_KEYBINDINGS.contains(&kb.id))
        .map(|kb| {
            let accel = get_accel(kb.id, overrides);
            format!("{}: {}", kb.description, accel_to_display(&accel))
        })
        .collect()
}

/// Resolve every back binding, honouring overrides.
pub fn back_accels(overrides: &HashMap<String, String>) -> Vec<ParsedAccel> {
    BACK_KEYBINDINGS
        .iter()
        .filter_map(|id| parse_accel(&get_accel(id, overrides)))
        .collect()
}
