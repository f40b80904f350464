//! Hit-test provider interface
//!
//! The platform owns ray/surface intersection: each frame it can report
//! where a ray from the viewer meets a detected real-world surface. Getting
//! there requires one-time asynchronous setup per session (request a
//! viewer-relative reference space, then a hit-test source bound to it).
//! That setup is modeled here as a polled state machine so the render loop
//! never blocks: frames arriving before setup completes simply see no hit.

use crate::foundation::math::Pose;

/// Lifecycle of the per-session hit-test source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupState {
    /// Setup has not been requested yet
    #[default]
    NotRequested,
    /// Setup request is in flight; frames see no hit until it resolves
    Pending,
    /// Source acquired; per-frame queries are meaningful
    Ready,
    /// Platform declined hit-testing; permanent for this session
    Unsupported,
}

/// Per-frame surface hit source supplied by the host platform
///
/// Implementations wrap the real XR device API in production and scripted
/// frame sequences in tests and demos.
pub trait HitTestProvider {
    /// Advance one-time setup and report its current state
    ///
    /// Called once per frame until the provider reports `Ready` or
    /// `Unsupported`; after `Unsupported` the caller must stop asking.
    fn poll_setup(&mut self) -> SetupState;

    /// Candidate hit poses for the current frame, most relevant first
    ///
    /// May be empty. The placement core consumes only the first element;
    /// ordering among candidates is provider-defined.
    fn hit_results(&mut self) -> Box<dyn Iterator<Item = Pose> + '_>;

    /// Drop the platform hit-test source (session teardown)
    fn discard_source(&mut self);
}

/// Gate between the render loop and a [`HitTestProvider`]
///
/// Owns the setup state machine: polls the provider until it is ready,
/// latches `Unsupported` permanently, and yields at most one hit per frame.
#[derive(Debug, Default)]
pub struct HitTester {
    state: SetupState,
}

impl HitTester {
    /// Create a gate with setup not yet requested
    pub fn new() -> Self {
        Self::default()
    }

    /// Current setup state
    pub fn state(&self) -> SetupState {
        self.state
    }

    /// Whether per-frame queries are meaningful
    pub fn is_ready(&self) -> bool {
        self.state == SetupState::Ready
    }

    /// Query the best hit for the current frame
    ///
    /// Drives setup forward when it has not completed, and returns `None`
    /// for every frame until the provider is ready. Once the provider
    /// reports `Unsupported` it is never polled again.
    pub fn first_hit<P: HitTestProvider + ?Sized>(&mut self, provider: &mut P) -> Option<Pose> {
        match self.state {
            SetupState::Unsupported => return None,
            SetupState::Ready => {}
            SetupState::NotRequested | SetupState::Pending => {
                self.state = provider.poll_setup();
                match self.state {
                    SetupState::Ready => {
                        log::info!("hit-test source acquired");
                    }
                    SetupState::Unsupported => {
                        log::warn!("hit-testing unsupported for this session");
                        return None;
                    }
                    _ => return None,
                }
            }
        }

        provider.hit_results().next()
    }

    /// Tear down for session end: discard the source reference
    pub fn reset<P: HitTestProvider + ?Sized>(&mut self, provider: &mut P) {
        provider.discard_source();
        self.state = SetupState::NotRequested;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted provider used across the crate's tests

    use super::*;
    use std::collections::VecDeque;

    /// Provider that replays a fixed per-frame hit script
    pub struct ScriptedProvider {
        /// Frames of setup polling before the source becomes ready
        pub setup_frames: u32,
        /// Whether the platform declines hit-testing entirely
        pub unsupported: bool,
        /// One entry per frame once ready; `None` means no surface hit
        pub frames: VecDeque<Option<Pose>>,
        /// Source discarded by teardown
        pub discarded: bool,
    }

    impl ScriptedProvider {
        pub fn ready_with(frames: Vec<Option<Pose>>) -> Self {
            Self {
                setup_frames: 0,
                unsupported: false,
                frames: frames.into(),
                discarded: false,
            }
        }

        pub fn unsupported() -> Self {
            Self {
                setup_frames: 0,
                unsupported: true,
                frames: VecDeque::new(),
                discarded: false,
            }
        }
    }

    impl HitTestProvider for ScriptedProvider {
        fn poll_setup(&mut self) -> SetupState {
            if self.unsupported {
                return SetupState::Unsupported;
            }
            if self.setup_frames > 0 {
                self.setup_frames -= 1;
                return SetupState::Pending;
            }
            SetupState::Ready
        }

        fn hit_results(&mut self) -> Box<dyn Iterator<Item = Pose> + '_> {
            match self.frames.pop_front().flatten() {
                Some(pose) => Box::new(std::iter::once(pose)),
                None => Box::new(std::iter::empty()),
            }
        }

        fn discard_source(&mut self) {
            self.discarded = true;
            self.frames.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedProvider;
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_no_hits_until_setup_completes() {
        let pose = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
        let mut provider = ScriptedProvider::ready_with(vec![Some(pose), Some(pose)]);
        provider.setup_frames = 2;

        let mut tester = HitTester::new();

        // Two frames of pending setup yield nothing
        assert_eq!(tester.first_hit(&mut provider), None);
        assert_eq!(tester.state(), SetupState::Pending);
        assert_eq!(tester.first_hit(&mut provider), None);

        // Third frame: setup resolves and the hit comes through
        assert_eq!(tester.first_hit(&mut provider), Some(pose));
        assert!(tester.is_ready());
    }

    #[test]
    fn test_unsupported_is_permanent() {
        let mut provider = ScriptedProvider::unsupported();
        let mut tester = HitTester::new();

        assert_eq!(tester.first_hit(&mut provider), None);
        assert_eq!(tester.state(), SetupState::Unsupported);

        // Further frames never poll the provider again
        provider.unsupported = false;
        assert_eq!(tester.first_hit(&mut provider), None);
        assert_eq!(tester.state(), SetupState::Unsupported);
    }

    #[test]
    fn test_only_first_candidate_is_consumed() {
        let near = Pose::from_position(Vec3::new(0.0, 0.0, -1.0));
        let mut provider = ScriptedProvider::ready_with(vec![Some(near)]);
        let mut tester = HitTester::new();

        assert_eq!(tester.first_hit(&mut provider), Some(near));
    }

    #[test]
    fn test_reset_discards_source() {
        let mut provider = ScriptedProvider::ready_with(vec![Some(Pose::identity())]);
        let mut tester = HitTester::new();
        let _ = tester.first_hit(&mut provider);

        tester.reset(&mut provider);

        assert!(provider.discarded);
        assert_eq!(tester.state(), SetupState::NotRequested);
    }
}
