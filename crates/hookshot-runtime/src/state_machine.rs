//! Generic mode container.
//!
//! A [`StateMachine`] holds the active mode of some owner and drives it with
//! an explicit context argument. Modes are plain `Copy` values (usually a
//! fieldless enum) that implement [`Mode`] for the context they operate on;
//! dispatch is a `match` inside those impls, not a runtime registry.
//!
//! After every `process` call the active mode is asked for a transition. A
//! transition runs `on_exit` of the old mode and `on_enter` of the new one in
//! the same call, so nothing observes the gap between them. Transitioning to
//! the active mode is allowed and re-runs exit/enter.

use hookshot_core::{HookshotError, Result};
use std::fmt;

/// Which host callback a `process` call stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessType {
    /// Once per rendered frame
    Frame,
    /// Once per fixed physics step
    Physics,
}

/// Behaviour of one mode over context `C`
pub trait Mode<C>: Copy + Eq + fmt::Debug {
    fn on_enter(self, ctx: &mut C) -> Result<()>;

    fn on_exit(self, ctx: &mut C) -> Result<()>;

    fn process(self, ctx: &mut C, kind: ProcessType, dt: f32) -> Result<()>;

    /// Next mode, or `None` to stay
    fn transition(self, ctx: &C) -> Option<Self>;
}

/// A mode change that happened during `process`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<M> {
    pub from: M,
    pub to: M,
}

/// Drives a set of registered modes, starting from an initial one
#[derive(Debug, Clone)]
pub struct StateMachine<M> {
    current: M,
    registered: Vec<M>,
    entered: bool,
}

impl<M: Copy + Eq + fmt::Debug> StateMachine<M> {
    /// Build a machine over `registered` modes.
    ///
    /// Fails if no modes are given or the initial mode is not among them.
    pub fn new(initial: M, registered: &[M]) -> Result<Self> {
        if registered.is_empty() {
            return Err(HookshotError::NoModes);
        }
        if !registered.contains(&initial) {
            return Err(HookshotError::UnregisteredMode(format!("{initial:?}")));
        }
        Ok(Self {
            current: initial,
            registered: registered.to_vec(),
            entered: false,
        })
    }

    pub fn current(&self) -> M {
        self.current
    }

    pub fn is_registered(&self, mode: M) -> bool {
        self.registered.contains(&mode)
    }

    /// Enter the initial mode if that has not happened yet
    pub fn start<C>(&mut self, ctx: &mut C) -> Result<()>
    where
        M: Mode<C>,
    {
        if !self.entered {
            self.entered = true;
            self.current.on_enter(ctx)?;
        }
        Ok(())
    }

    /// Run the active mode's handler, then apply its transition if any
    pub fn process<C>(
        &mut self,
        ctx: &mut C,
        kind: ProcessType,
        dt: f32,
    ) -> Result<Option<Transition<M>>>
    where
        M: Mode<C>,
    {
        self.start(ctx)?;
        self.current.process(ctx, kind, dt)?;

        match self.current.transition(ctx) {
            Some(next) => {
                let from = self.current;
                self.switch(ctx, next)?;
                Ok(Some(Transition { from, to: next }))
            }
            None => Ok(None),
        }
    }

    /// Force a transition from outside the mode handlers
    pub fn switch<C>(&mut self, ctx: &mut C, next: M) -> Result<()>
    where
        M: Mode<C>,
    {
        if !self.is_registered(next) {
            return Err(HookshotError::UnregisteredMode(format!("{next:?}")));
        }
        self.start(ctx)?;
        tracing::trace!(from = ?self.current, to = ?next, "switching mode");
        self.current.on_exit(ctx)?;
        self.current = next;
        self.current.on_enter(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Broken,
    }

    #[derive(Default)]
    struct Counter {
        log: Vec<String>,
        ticks: u32,
        next: Option<Light>,
    }

    impl Mode<Counter> for Light {
        fn on_enter(self, ctx: &mut Counter) -> Result<()> {
            ctx.log.push(format!("enter {self:?}"));
            Ok(())
        }

        fn on_exit(self, ctx: &mut Counter) -> Result<()> {
            ctx.log.push(format!("exit {self:?}"));
            Ok(())
        }

        fn process(self, ctx: &mut Counter, kind: ProcessType, _dt: f32) -> Result<()> {
            if kind == ProcessType::Physics {
                ctx.ticks += 1;
            }
            Ok(())
        }

        fn transition(self, ctx: &Counter) -> Option<Self> {
            ctx.next.filter(|n| *n != self || ctx.ticks > 0)
        }
    }

    #[test]
    fn initial_mode_must_be_registered() {
        let err = StateMachine::new(Light::Broken, &[Light::Red, Light::Green]).unwrap_err();
        assert!(matches!(err, HookshotError::UnregisteredMode(name) if name == "Broken"));
        assert!(matches!(
            StateMachine::<Light>::new(Light::Red, &[]),
            Err(HookshotError::NoModes)
        ));
    }

    #[test]
    fn first_process_enters_initial_mode() {
        let mut sm = StateMachine::new(Light::Red, &[Light::Red, Light::Green]).unwrap();
        let mut ctx = Counter::default();
        assert_eq!(sm.process(&mut ctx, ProcessType::Frame, 0.0).unwrap(), None);
        assert_eq!(ctx.log, vec!["enter Red"]);
    }

    #[test]
    fn transition_runs_exit_then_enter() {
        let mut sm = StateMachine::new(Light::Red, &[Light::Red, Light::Green]).unwrap();
        let mut ctx = Counter {
            next: Some(Light::Green),
            ..Counter::default()
        };

        let t = sm.process(&mut ctx, ProcessType::Physics, 0.1).unwrap();
        assert_eq!(
            t,
            Some(Transition {
                from: Light::Red,
                to: Light::Green
            })
        );
        assert_eq!(sm.current(), Light::Green);
        assert_eq!(ctx.log, vec!["enter Red", "exit Red", "enter Green"]);
    }

    #[test]
    fn self_transition_reenters() {
        let mut sm = StateMachine::new(Light::Green, &[Light::Red, Light::Green]).unwrap();
        let mut ctx = Counter {
            next: Some(Light::Green),
            ..Counter::default()
        };
        sm.process(&mut ctx, ProcessType::Physics, 0.1).unwrap();
        assert_eq!(ctx.log, vec!["enter Green", "exit Green", "enter Green"]);
    }

    #[test]
    fn unregistered_target_is_fatal() {
        let mut sm = StateMachine::new(Light::Red, &[Light::Red, Light::Green]).unwrap();
        let mut ctx = Counter {
            next: Some(Light::Broken),
            ..Counter::default()
        };
        let err = sm.process(&mut ctx, ProcessType::Frame, 0.0).unwrap_err();
        assert!(matches!(err, HookshotError::UnregisteredMode(name) if name == "Broken"));
        assert_eq!(sm.current(), Light::Red);
    }
}
