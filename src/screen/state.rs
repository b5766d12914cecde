//! Screen lifecycle and transition state
//!
//! Every screen owns a [`ScreenCore`] holding the state the manager needs to
//! route input and decide visibility. The transition position runs from 0.0
//! (fully on) to 1.0 (fully off).

use std::time::Duration;

use crate::input::PlayerIndex;

/// Frame timing handed to every update and draw
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GameTime {
    /// Time since the previous frame
    pub elapsed: Duration,
    /// Time since the game started
    pub total: Duration,
}

impl GameTime {
    pub fn new(elapsed: Duration, total: Duration) -> Self {
        GameTime { elapsed, total }
    }

    /// Convenience for tests and fixed-step hosts
    pub fn from_secs_f32(elapsed: f32) -> Self {
        let elapsed = Duration::from_secs_f32(elapsed);
        GameTime {
            elapsed,
            total: elapsed,
        }
    }
}

/// Transition state of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    TransitionOn,
    Active,
    TransitionOff,
    Hidden,
}

/// Which way a transition moves the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    On,
    Off,
}

/// State shared by every screen
#[derive(Debug, Clone)]
pub struct ScreenCore {
    state: ScreenState,
    transition_on_time: Duration,
    transition_off_time: Duration,
    transition_position: f32,
    is_popup: bool,
    is_exiting: bool,
    is_serializable: bool,
    other_screen_has_focus: bool,
    controlling_player: Option<PlayerIndex>,
    removal_pending: bool,
}

impl ScreenCore {
    /// Creates a core that starts transitioning on, with instant transitions
    pub fn new() -> Self {
        ScreenCore {
            state: ScreenState::TransitionOn,
            transition_on_time: Duration::ZERO,
            transition_off_time: Duration::ZERO,
            transition_position: 1.0,
            is_popup: false,
            is_exiting: false,
            is_serializable: true,
            other_screen_has_focus: false,
            controlling_player: None,
            removal_pending: false,
        }
    }

    pub fn with_transitions(on: Duration, off: Duration) -> Self {
        ScreenCore {
            transition_on_time: on,
            transition_off_time: off,
            ..Self::new()
        }
    }

    pub fn popup(mut self) -> Self {
        self.is_popup = true;
        self
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn transition_position(&self) -> f32 {
        self.transition_position
    }

    /// 1.0 when fully on, 0.0 when fully off
    pub fn transition_alpha(&self) -> f32 {
        1.0 - self.transition_position
    }

    pub fn transition_on_time(&self) -> Duration {
        self.transition_on_time
    }

    pub fn transition_off_time(&self) -> Duration {
        self.transition_off_time
    }

    pub fn is_popup(&self) -> bool {
        self.is_popup
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn is_serializable(&self) -> bool {
        self.is_serializable
    }

    pub fn set_serializable(&mut self, serializable: bool) {
        self.is_serializable = serializable;
    }

    pub fn controlling_player(&self) -> Option<PlayerIndex> {
        self.controlling_player
    }

    /// True when this screen may respond to input
    pub fn is_active(&self) -> bool {
        !self.other_screen_has_focus
            && matches!(self.state, ScreenState::TransitionOn | ScreenState::Active)
    }

    /// Set when the exit transition finished or an instant exit was requested
    ///
    /// The manager removes the screen as soon as it sees this.
    pub fn is_removal_pending(&self) -> bool {
        self.removal_pending
    }

    /// Called by the manager when the screen joins the stack
    pub(crate) fn attach(&mut self, controlling_player: Option<PlayerIndex>) {
        self.controlling_player = controlling_player;
        self.is_exiting = false;
        self.removal_pending = false;
    }

    /// Advances the transition state machine by one frame
    pub fn update(
        &mut self,
        elapsed: Duration,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) {
        self.other_screen_has_focus = other_screen_has_focus;

        if self.is_exiting {
            self.state = ScreenState::TransitionOff;
            if !self.update_transition(elapsed, self.transition_off_time, Direction::Off) {
                self.removal_pending = true;
            }
        } else if covered_by_other_screen {
            let transitioning =
                self.update_transition(elapsed, self.transition_off_time, Direction::Off);
            self.state = if transitioning {
                ScreenState::TransitionOff
            } else {
                ScreenState::Hidden
            };
        } else {
            let transitioning =
                self.update_transition(elapsed, self.transition_on_time, Direction::On);
            self.state = if transitioning {
                ScreenState::TransitionOn
            } else {
                ScreenState::Active
            };
        }
    }

    /// Moves the position; returns false once the transition has finished
    fn update_transition(
        &mut self,
        elapsed: Duration,
        time: Duration,
        direction: Direction,
    ) -> bool {
        let delta = if time.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / time.as_secs_f32()
        };

        match direction {
            Direction::On => {
                self.transition_position -= delta;
                if self.transition_position <= 0.0 {
                    self.transition_position = 0.0;
                    return false;
                }
            }
            Direction::Off => {
                self.transition_position += delta;
                if self.transition_position >= 1.0 {
                    self.transition_position = 1.0;
                    return false;
                }
            }
        }

        true
    }

    /// Asks the screen to go away
    ///
    /// With a zero off-time the screen is flagged for immediate removal,
    /// otherwise it transitions off first.
    pub fn exit_screen(&mut self) {
        if self.transition_off_time.is_zero() {
            self.removal_pending = true;
        } else {
            self.is_exiting = true;
        }
    }
}

impl Default for ScreenCore {
    fn default() -> Self {
        Self::new()
    }
}
