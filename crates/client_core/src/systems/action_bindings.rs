//! Map button presses to `ClientCmd`s for the transport to proxy.
//!
//! Movement keys repeat while held; jump, attack, the weapon-slot toggle and
//! the ready toggle are edge-triggered by the input layer before they reach
//! this snapshot.

use net_core::command::ClientCmd;

#[derive(Default, Clone, Copy, Debug)]
pub struct ButtonSnapshot {
    /// Held state, sampled every frame.
    pub left_held: bool,
    pub right_held: bool,
    /// Edge-triggered presses.
    pub jump_pressed: bool,
    pub attack_pressed: bool,
    pub weapon_slot_pressed: bool,
    pub ready_toggled: bool,
}

#[derive(Clone, Debug)]
pub struct Bindings {
    pub left: ClientCmd,
    pub right: ClientCmd,
    pub jump: ClientCmd,
    pub attack: ClientCmd,
    pub weapon_slot: ClientCmd,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            left: ClientCmd::Left,
            right: ClientCmd::Right,
            jump: ClientCmd::Jump,
            attack: ClientCmd::Attack,
            weapon_slot: ClientCmd::WeaponSlot,
        }
    }
}

/// Append this frame's commands to `out`. `is_ready` is the current local
/// readiness; a ready toggle sends its inverse.
pub fn handle_buttons(binds: &Bindings, input: &ButtonSnapshot, is_ready: bool, out: &mut Vec<ClientCmd>) {
    if input.left_held {
        out.push(binds.left);
    }
    if input.right_held {
        out.push(binds.right);
    }
    if input.jump_pressed {
        out.push(binds.jump);
    }
    if input.attack_pressed {
        out.push(binds.attack);
    }
    if input.weapon_slot_pressed {
        out.push(binds.weapon_slot);
    }
    if input.ready_toggled {
        out.push(ClientCmd::SetReady { ready: !is_ready });
    }
}
