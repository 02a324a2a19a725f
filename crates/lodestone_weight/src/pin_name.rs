//! Pin identity resolution.
//!
//! Maps a [`RealPin`] to the textual name the timing oracle understands.
//! Three naming regimes exist:
//!
//! - primary-IO terminals without internal structure are addressed by their
//!   bare terminal name;
//! - designs from the LEF/DEF/Verilog flow carry per-owner pin-name tables,
//!   and pins compose as `<owner>/<table suffix>`;
//! - bookshelf designs have no tables, and the suffix is synthesized as
//!   `I<ordinal>` or `O<ordinal>` from the pin's direction.
//!
//! Virtual (Steiner) endpoints never pass through here; they map to
//! synthetic node indices in the parasitic builder. Composition itself is
//! infallible; a mismatched name surfaces as a lookup failure against the
//! oracle, which is fatal.

use lodestone_netlist::{Netlist, PinDirection, PinOwner, RealPin};

/// The hierarchy divider in composed pin names.
const DIVIDER: char = '/';

/// The escape character of the oracle's name grammar.
const ESCAPE: char = '\\';

/// Returns the oracle-facing name for a real pin.
///
/// With `escape` set, divider and escape characters inside the owner name
/// are escaped before the suffix is attached.
pub fn pin_name(netlist: &Netlist, pin: &RealPin, escape: bool) -> String {
    if let PinOwner::Terminal(term) = pin.owner {
        if netlist.terminal(term).no_internal_structure {
            return netlist.terminal(term).name.clone();
        }
    }

    let mut owner = netlist.owner_name(pin.owner).to_string();
    if escape {
        owner = escape_name(&owner);
    }

    match netlist.pin_suffix(pin.owner, pin.ordinal) {
        Some(suffix) => format!("{owner}{DIVIDER}{suffix}"),
        None => {
            // Bookshelf regime: synthesize the suffix from direction and
            // ordinal.
            let prefix = match pin.direction {
                PinDirection::Input => 'I',
                PinDirection::Output => 'O',
            };
            format!("{owner}{DIVIDER}{prefix}{}", pin.ordinal)
        }
    }
}

/// Escapes divider and escape characters in a name component.
fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == DIVIDER || ch == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_netlist::{
        Instance, InstanceId, PinNameTables, Terminal, TerminalId,
    };

    fn netlist_with_instance(name: &str) -> (Netlist, RealPin) {
        let mut nl = Netlist::new();
        let inst = nl.add_instance(Instance {
            id: InstanceId::from_raw(0),
            name: name.into(),
        });
        let pin = RealPin {
            owner: PinOwner::Instance(inst),
            direction: PinDirection::Output,
            ordinal: 0,
        };
        (nl, pin)
    }

    #[test]
    fn bookshelf_output_pin() {
        let (nl, pin) = netlist_with_instance("a");
        assert_eq!(pin_name(&nl, &pin, false), "a/O0");
    }

    #[test]
    fn bookshelf_input_pin_with_ordinal() {
        let (nl, mut pin) = netlist_with_instance("b");
        pin.direction = PinDirection::Input;
        pin.ordinal = 3;
        assert_eq!(pin_name(&nl, &pin, false), "b/I3");
    }

    #[test]
    fn table_regime_uses_suffix() {
        let (mut nl, mut pin) = netlist_with_instance("u_ff");
        nl.pin_names = Some(PinNameTables {
            instances: vec![vec!["D".into(), "Q".into()]],
            terminals: vec![],
        });
        pin.ordinal = 1;
        assert_eq!(pin_name(&nl, &pin, false), "u_ff/Q");
    }

    #[test]
    fn terminal_without_structure_is_bare_name() {
        let mut nl = Netlist::new();
        let term = nl.add_terminal(Terminal {
            id: TerminalId::from_raw(0),
            name: "clk".into(),
            no_internal_structure: true,
        });
        let pin = RealPin {
            owner: PinOwner::Terminal(term),
            direction: PinDirection::Input,
            ordinal: 0,
        };
        assert_eq!(pin_name(&nl, &pin, false), "clk");
    }

    #[test]
    fn structured_terminal_composes_like_instance() {
        let mut nl = Netlist::new();
        let term = nl.add_terminal(Terminal {
            id: TerminalId::from_raw(0),
            name: "pad_0".into(),
            no_internal_structure: false,
        });
        nl.pin_names = Some(PinNameTables {
            instances: vec![],
            terminals: vec![vec!["PAD".into()]],
        });
        let pin = RealPin {
            owner: PinOwner::Terminal(term),
            direction: PinDirection::Output,
            ordinal: 0,
        };
        assert_eq!(pin_name(&nl, &pin, false), "pad_0/PAD");
    }

    #[test]
    fn escaping_hierarchical_owner_name() {
        let (nl, pin) = netlist_with_instance("core/alu");
        assert_eq!(pin_name(&nl, &pin, false), "core/alu/O0");
        assert_eq!(pin_name(&nl, &pin, true), "core\\/alu/O0");
    }

    #[test]
    fn escaping_escape_characters() {
        assert_eq!(escape_name(r"a\b"), r"a\\b");
        assert_eq!(escape_name("plain"), "plain");
    }
}
