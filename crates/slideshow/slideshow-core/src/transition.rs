//! Transition strategies: cross-fade and carousel.
//!
//! A strategy is built once from [`TransitionKind`] and driven by the
//! controller: `launch` issues the first animation, `advance` is called for
//! every completed ticket until the strategy reports [`TransitionStatus::Settled`].

use serde::{Deserialize, Serialize};

use crate::config::TransitionKind;
use crate::host::{AnimationRequest, Animator};
use crate::ids::{AnimationTicket, IdSequence, PageHandle};
use crate::style::{Motion, Side};

/// Direction of travel through the page ring.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Side the incoming page enters from.
    pub fn entry_side(self) -> Side {
        match self {
            Direction::Forward => Side::Right,
            Direction::Backward => Side::Left,
        }
    }

    /// Side the outgoing page leaves toward.
    pub fn exit_side(self) -> Side {
        match self {
            Direction::Forward => Side::Left,
            Direction::Backward => Side::Right,
        }
    }
}

/// Direction requested by a `go_to` caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionHint {
    #[default]
    Forward,
    Backward,
    /// Shortest way around the ring; ties go forward.
    Intelligent,
}

impl DirectionHint {
    pub fn resolve(self, current: Option<usize>, target: usize, len: usize) -> Direction {
        match self {
            DirectionHint::Forward => Direction::Forward,
            DirectionHint::Backward => Direction::Backward,
            DirectionHint::Intelligent => match current {
                Some(current) if len > 0 => shortest_direction(current, target, len),
                _ => Direction::Forward,
            },
        }
    }
}

pub fn shortest_direction(current: usize, target: usize, len: usize) -> Direction {
    let n = len as i64;
    let (cur, tgt) = (current as i64, target as i64);
    let clockwise = (tgt - cur).rem_euclid(n);
    let counter_clockwise = (cur - tgt).rem_euclid(n);
    if counter_clockwise < clockwise {
        Direction::Backward
    } else {
        Direction::Forward
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransitionStatus {
    Pending,
    Settled,
    /// The ticket did not belong to the running transition.
    Stale,
}

/// Input to [`TransitionStrategy::launch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Launch {
    pub direction: Direction,
    pub outgoing: Option<PageHandle>,
    pub incoming: PageHandle,
    pub duration_ms: u32,
}

/// Shared plumbing handed to a strategy for the duration of one call.
pub struct TransitionCtx<'a> {
    pub animator: &'a mut dyn Animator,
    pub tickets: &'a mut IdSequence<AnimationTicket>,
}

impl TransitionCtx<'_> {
    fn play(&mut self, duration_ms: u32, tracks: Vec<(PageHandle, Motion)>) -> AnimationTicket {
        let ticket = self.tickets.next_id();
        self.animator.animate(AnimationRequest {
            ticket,
            duration_ms,
            tracks,
        });
        ticket
    }
}

pub trait TransitionStrategy: std::fmt::Debug {
    /// Start a transition. Never called while another is running.
    fn launch(&mut self, launch: Launch, ctx: &mut TransitionCtx<'_>) -> TransitionStatus;

    /// Feed back a completed animation.
    fn advance(&mut self, ticket: AnimationTicket, ctx: &mut TransitionCtx<'_>)
        -> TransitionStatus;
}

pub fn strategy_for(kind: TransitionKind) -> Box<dyn TransitionStrategy> {
    match kind {
        TransitionKind::CrossFade => Box::new(CrossFade::default()),
        TransitionKind::Carousel => Box::new(Carousel::default()),
    }
}

#[derive(Debug, Default)]
enum FadePhase {
    #[default]
    Idle,
    FadingOut {
        ticket: AnimationTicket,
        incoming: PageHandle,
        duration_ms: u32,
    },
    FadingIn {
        ticket: AnimationTicket,
    },
}

/// Outgoing page fades out completely before the incoming page fades in.
#[derive(Debug, Default)]
pub struct CrossFade {
    phase: FadePhase,
}

impl TransitionStrategy for CrossFade {
    fn launch(&mut self, launch: Launch, ctx: &mut TransitionCtx<'_>) -> TransitionStatus {
        self.phase = match launch.outgoing {
            Some(outgoing) => FadePhase::FadingOut {
                ticket: ctx.play(launch.duration_ms, vec![(outgoing, Motion::FadeOut)]),
                incoming: launch.incoming,
                duration_ms: launch.duration_ms,
            },
            None => FadePhase::FadingIn {
                ticket: ctx.play(launch.duration_ms, vec![(launch.incoming, Motion::FadeIn)]),
            },
        };
        TransitionStatus::Pending
    }

    fn advance(
        &mut self,
        done: AnimationTicket,
        ctx: &mut TransitionCtx<'_>,
    ) -> TransitionStatus {
        match self.phase {
            FadePhase::FadingOut {
                ticket,
                incoming,
                duration_ms,
            } if ticket == done => {
                self.phase = FadePhase::FadingIn {
                    ticket: ctx.play(duration_ms, vec![(incoming, Motion::FadeIn)]),
                };
                TransitionStatus::Pending
            }
            FadePhase::FadingIn { ticket } if ticket == done => {
                self.phase = FadePhase::Idle;
                TransitionStatus::Settled
            }
            _ => TransitionStatus::Stale,
        }
    }
}

/// Both pages slide in lockstep; the incoming page enters from the side
/// given by the direction.
#[derive(Debug, Default)]
pub struct Carousel {
    running: Option<AnimationTicket>,
}

impl TransitionStrategy for Carousel {
    fn launch(&mut self, launch: Launch, ctx: &mut TransitionCtx<'_>) -> TransitionStatus {
        let ticket = match launch.outgoing {
            Some(outgoing) => ctx.play(
                launch.duration_ms,
                vec![
                    (
                        outgoing,
                        Motion::SlideOut {
                            toward: launch.direction.exit_side(),
                        },
                    ),
                    (
                        launch.incoming,
                        Motion::SlideIn {
                            from: launch.direction.entry_side(),
                        },
                    ),
                ],
            ),
            // Nothing to slide past on first display.
            None => ctx.play(0, vec![(launch.incoming, Motion::Appear)]),
        };
        self.running = Some(ticket);
        TransitionStatus::Pending
    }

    fn advance(
        &mut self,
        done: AnimationTicket,
        _ctx: &mut TransitionCtx<'_>,
    ) -> TransitionStatus {
        if self.running == Some(done) {
            self.running = None;
            TransitionStatus::Settled
        } else {
            TransitionStatus::Stale
        }
    }
}
