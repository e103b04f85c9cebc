use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::container::PageStack;
use crate::events::{EventLog, PageEvent};

type Pager = PagingCoordinator<i32, String, PageStack<i32, String>>;

fn pager_with(start: i32, navigator: Navigator<i32>) -> (Pager, SelectionBinding<i32>, EventLog<i32>) {
    let binding = SelectionBinding::new(start);
    let log = EventLog::new();
    let pager = PagingCoordinator::new(
        binding.clone(),
        navigator,
        |n: &i32| format!("Page {n}"),
        PageStack::new(),
    )
    .with_callbacks(log.callbacks());
    (pager, binding, log)
}

fn pager(start: i32) -> (Pager, SelectionBinding<i32>, EventLog<i32>) {
    pager_with(start, Navigator::new(|n: &i32| n - 1, |n: &i32| n + 1))
}

fn content(pager: &Pager) -> Option<String> {
    pager.container().displayed().map(|page| page.content().clone())
}

/// Let every queued continuation and running animation finish
fn settle(pager: &mut Pager) {
    for _ in 0..32 {
        pager.run_until_idle();
        if pager.container().is_animating() {
            pager.container_mut().settle();
        } else if pager.dispatch_queue().is_empty() {
            return;
        }
    }
    panic!("pager did not settle");
}

#[test]
fn test_initial_page_shown_without_animation() {
    let (pager, binding, log) = pager(0);

    assert_eq!(pager.displayed_tag(), Some(0));
    assert_eq!(content(&pager).as_deref(), Some("Page 0"));
    assert!(!pager.container().is_animating());
    assert!(pager.is_settled());
    assert!(pager.binding().shares_with(&binding));
    assert!(log.is_empty());
}

#[test]
fn test_neighbors_are_rendered_fresh() {
    let stride = Rc::new(Cell::new(1));
    let s = stride.clone();
    let (pager, _, _) = pager_with(0, Navigator::new(|n: &i32| n - 1, move |n: &i32| n + s.get()));

    assert_eq!(*pager.neighbor_after(&0).tag(), 1);
    stride.set(3);
    let after = pager.neighbor_after(&0);
    assert_eq!(*after.tag(), 3);
    assert_eq!(after.content(), "Page 3");
    assert_eq!(*pager.neighbor_before(&0).tag(), -1);
}

#[test]
fn test_swipe_forward_commits() {
    let (mut pager, binding, log) = pager(0);

    pager.begin_swipe(Direction::Forward).unwrap();
    assert_eq!(pager.phase(), PagingPhase::Swiping);
    assert_eq!(binding.get(), 0);
    assert_eq!(log.events(), vec![PageEvent::WillChange(1)]);

    pager.finish_swipe(true).unwrap();

    assert_eq!(binding.get(), 1);
    assert_eq!(log.events(), vec![PageEvent::WillChange(1), PageEvent::Changed(1)]);
    assert_eq!(content(&pager).as_deref(), Some("Page 1"));
    assert!(pager.is_settled());
}

#[test]
fn test_binding_written_before_changed_callback() {
    let binding = SelectionBinding::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let observer = binding.clone();
    let record = seen.clone();

    let mut pager = PagingCoordinator::new(
        binding.clone(),
        Navigator::<i32>::counting(),
        |n: &i32| n.to_string(),
        PageStack::new(),
    )
    .on_page_changed(move |tag: &i32| record.borrow_mut().push((*tag, observer.get())));

    pager.begin_swipe(Direction::Forward).unwrap();
    pager.finish_swipe(true).unwrap();

    assert_eq!(*seen.borrow(), vec![(1, 1)]);
}

#[test]
fn test_cancelled_swipe_changes_nothing() {
    let (mut pager, binding, log) = pager(1);

    pager.begin_swipe(Direction::Forward).unwrap();
    assert_eq!(log.events(), vec![PageEvent::WillChange(2)]);

    pager.finish_swipe(false).unwrap();

    assert_eq!(binding.get(), 1);
    assert_eq!(pager.displayed_tag(), Some(1));
    assert_eq!(log.events(), vec![PageEvent::WillChange(2)]);
    assert!(pager.is_settled());
}

#[test]
fn test_external_change_jumps_forward() {
    let (mut pager, binding, log) = pager(1);

    binding.set(5);
    pager.reconcile();
    assert_eq!(pager.phase(), PagingPhase::JumpScheduled);
    assert_eq!(pager.displayed_tag(), Some(1));

    pager.run_pending();
    assert!(matches!(
        pager.phase(),
        PagingPhase::AwaitingStep1 { direction: Direction::Forward, .. }
    ));
    assert_eq!(pager.container().outgoing().map(|page| *page.tag()), Some(1));

    settle(&mut pager);

    assert_eq!(pager.displayed_tag(), Some(5));
    assert_eq!(content(&pager).as_deref(), Some("Page 5"));
    assert_eq!(binding.get(), 5);
    assert_eq!(log.events(), vec![PageEvent::WillChange(5), PageEvent::Changed(5)]);
    assert!(pager.is_settled());
}

#[test]
fn test_external_change_jumps_in_reverse() {
    let (mut pager, binding, _) = pager(5);

    binding.set(2);
    pager.reconcile();
    pager.run_pending();

    assert!(matches!(
        pager.phase(),
        PagingPhase::AwaitingStep1 { direction: Direction::Reverse, .. }
    ));
    assert_eq!(pager.container().animation_direction(), Some(Direction::Reverse));
}

#[test]
fn test_jump_steps_run_one_turn_at_a_time() {
    let (mut pager, _, _) = pager(0);

    pager.jump_to(3);
    assert_eq!(pager.run_pending(), 1);
    assert!(matches!(pager.phase(), PagingPhase::AwaitingStep1 { .. }));

    // Step 1 only completes once the container animation ends
    assert_eq!(pager.run_pending(), 0);
    pager.container_mut().settle();
    pager.run_pending();
    assert!(matches!(pager.phase(), PagingPhase::AwaitingStep2 { .. }));
    assert!(!pager.container().is_animating());

    pager.run_pending();
    assert_eq!(pager.phase(), PagingPhase::Idle);
    assert_eq!(pager.displayed_tag(), Some(3));
}

#[test]
fn test_repeated_jump_settles_once() {
    let (mut pager, binding, log) = pager(0);

    pager.jump_to(4);
    pager.jump_to(4);
    assert_eq!(pager.dispatch_queue().len(), 1);

    settle(&mut pager);

    assert_eq!(pager.displayed_tag(), Some(4));
    assert_eq!(binding.get(), 4);
    assert_eq!(log.events(), vec![PageEvent::WillChange(4), PageEvent::Changed(4)]);
}

#[test]
fn test_superseded_jump_lands_on_latest_target() {
    let (mut pager, binding, log) = pager(0);

    pager.jump_to(4);
    pager.run_pending();
    binding.set(9);
    pager.reconcile();

    settle(&mut pager);

    assert_eq!(pager.displayed_tag(), Some(9));
    assert_eq!(content(&pager).as_deref(), Some("Page 9"));
    assert_eq!(
        log.events(),
        vec![PageEvent::WillChange(4), PageEvent::WillChange(9), PageEvent::Changed(9)]
    );
}

#[test]
fn test_target_moved_during_step_two_jumps_again() {
    let (mut pager, binding, log) = pager(0);

    pager.jump_to(2);
    pager.run_pending();
    pager.container_mut().settle();
    pager.run_pending();
    assert!(matches!(pager.phase(), PagingPhase::AwaitingStep2 { .. }));

    binding.set(-3);
    pager.reconcile();
    settle(&mut pager);

    assert_eq!(pager.displayed_tag(), Some(-3));
    assert_eq!(
        log.events(),
        vec![PageEvent::WillChange(2), PageEvent::WillChange(-3), PageEvent::Changed(-3)]
    );
}

#[test]
fn test_jump_to_shown_selection_is_noop() {
    let (mut pager, binding, log) = pager(0);

    pager.jump_to(0);
    pager.reconcile();

    assert!(pager.dispatch_queue().is_empty());
    assert_eq!(pager.phase(), PagingPhase::Idle);
    assert_eq!(binding.get(), 0);
    assert!(log.is_empty());
}

#[test]
fn test_binding_restored_before_jump_runs() {
    let (mut pager, binding, log) = pager(0);

    binding.set(5);
    pager.reconcile();
    binding.set(0);
    pager.reconcile();
    settle(&mut pager);

    assert_eq!(pager.displayed_tag(), Some(0));
    assert!(log.is_empty());
    assert!(pager.is_settled());
}

#[test]
fn test_direct_jump_updates_binding() {
    let (mut pager, binding, _) = pager(0);

    pager.jump_to(6);
    assert_eq!(binding.get(), 6);

    settle(&mut pager);
    pager.reconcile();

    assert_eq!(pager.displayed_tag(), Some(6));
    assert!(pager.is_settled());
}

#[test]
fn test_swipe_refused_while_jumping() {
    let (mut pager, _, _) = pager(0);

    pager.jump_to(3);
    assert_eq!(
        pager.begin_swipe(Direction::Forward),
        Err(PagingError::Busy("jump scheduled"))
    );

    pager.run_pending();
    assert_eq!(
        pager.begin_swipe(Direction::Reverse),
        Err(PagingError::Busy("jump step 1"))
    );

    settle(&mut pager);
    assert_eq!(pager.begin_swipe(Direction::Reverse), Ok(()));
}

#[test]
fn test_finish_without_swipe_is_refused() {
    let (mut pager, _, _) = pager(0);
    assert_eq!(pager.finish_swipe(true), Err(PagingError::NoSwipeInFlight));
}

#[test]
fn test_external_change_during_swipe_applies_after_cancel() {
    let (mut pager, binding, log) = pager(1);

    pager.begin_swipe(Direction::Forward).unwrap();
    binding.set(7);
    pager.reconcile();
    assert_eq!(pager.phase(), PagingPhase::Swiping);
    assert!(pager.dispatch_queue().is_empty());

    pager.finish_swipe(false).unwrap();
    assert_eq!(pager.phase(), PagingPhase::JumpScheduled);
    settle(&mut pager);

    assert_eq!(pager.displayed_tag(), Some(7));
    assert_eq!(binding.get(), 7);
    assert_eq!(
        log.events(),
        vec![PageEvent::WillChange(2), PageEvent::WillChange(7), PageEvent::Changed(7)]
    );
}

#[test]
fn test_committed_swipe_wins_over_external_change() {
    let (mut pager, binding, _) = pager(1);

    pager.begin_swipe(Direction::Forward).unwrap();
    binding.set(7);
    pager.reconcile();
    pager.finish_swipe(true).unwrap();
    pager.reconcile();

    assert_eq!(binding.get(), 2);
    assert_eq!(pager.displayed_tag(), Some(2));
    assert!(pager.is_settled());
}

#[test]
fn test_asymmetric_navigator() {
    let (mut pager, binding, _) = pager_with(0, Navigator::new(|n: &i32| n - 1, |n: &i32| n + 2));

    pager.begin_swipe(Direction::Forward).unwrap();
    pager.finish_swipe(true).unwrap();
    assert_eq!(binding.get(), 2);

    pager.begin_swipe(Direction::Reverse).unwrap();
    pager.finish_swipe(true).unwrap();
    assert_eq!(binding.get(), 1);
    assert_eq!(content(&pager).as_deref(), Some("Page 1"));
}

#[test]
fn test_content_reflects_state_at_commit() {
    let version = Rc::new(Cell::new(1));
    let v = version.clone();
    let binding = SelectionBinding::new(0);
    let mut pager = PagingCoordinator::new(
        binding.clone(),
        Navigator::<i32>::counting(),
        move |n: &i32| format!("Page {n} v{}", v.get()),
        PageStack::new(),
    );

    pager.begin_swipe(Direction::Forward).unwrap();
    version.set(2);
    pager.finish_swipe(true).unwrap();
    assert_eq!(
        pager.container().displayed().map(|p| p.content().clone()).as_deref(),
        Some("Page 1 v2")
    );

    pager.jump_to(4);
    pager.run_pending();
    version.set(3);
    pager.container_mut().settle();
    pager.run_until_idle();
    assert_eq!(
        pager.container().displayed().map(|p| p.content().clone()).as_deref(),
        Some("Page 4 v3")
    );
}

#[test]
fn test_reconcile_refreshes_displayed_content() {
    let version = Rc::new(Cell::new(1));
    let v = version.clone();
    let mut pager = PagingCoordinator::new(
        SelectionBinding::new(0),
        Navigator::<i32>::counting(),
        move |n: &i32| format!("{n}:{}", v.get()),
        PageStack::new(),
    );

    version.set(5);
    pager.reconcile();

    assert_eq!(
        pager.container().displayed().map(|p| p.content().clone()).as_deref(),
        Some("0:5")
    );
}

#[test]
fn test_stale_completion_is_ignored() {
    let (mut pager, binding, log) = pager(0);

    pager.dispatch_queue().dispatch(Continuation::SetCurrentFinished {
        ticket: TransitionTicket::first(),
        finished: true,
    });
    pager.run_until_idle();

    assert_eq!(pager.phase(), PagingPhase::Idle);
    assert_eq!(binding.get(), 0);
    assert!(log.is_empty());
}

/// A container that drops everything it is given
#[derive(Debug, Default)]
struct Blank;

impl PageContainer<i32, String> for Blank {
    fn displayed(&self) -> Option<&TaggedPage<i32, String>> {
        None
    }

    fn displayed_mut(&mut self) -> Option<&mut TaggedPage<i32, String>> {
        None
    }

    fn pending_mut(&mut self) -> Option<&mut TaggedPage<i32, String>> {
        None
    }

    fn set_current(&mut self, _: TaggedPage<i32, String>, _: Transition, _: Option<Completion>) {}

    fn begin_swipe(&mut self, _: TaggedPage<i32, String>, _: Direction) {}

    fn end_swipe(&mut self, _: bool) {}

    fn is_animating(&self) -> bool {
        false
    }
}

#[test]
fn test_unknown_container_state_is_a_noop() {
    let binding = SelectionBinding::new(0);
    let log = EventLog::new();
    let mut pager = PagingCoordinator::new(
        binding.clone(),
        Navigator::<i32>::counting(),
        |n: &i32| n.to_string(),
        Blank,
    )
    .with_callbacks(log.callbacks());

    binding.set(3);
    pager.reconcile();
    pager.jump_to(4);
    pager.on_transition_finished(true);
    pager.run_until_idle();

    assert_eq!(pager.begin_swipe(Direction::Forward), Err(PagingError::NoDisplayedPage));
    assert_eq!(binding.get(), 3);
    assert!(log.is_empty());
    assert!(pager.is_settled());
}

/// Applies every update at once but throws away completions of animated
/// ones, the way a control torn down mid-animation would
#[derive(Debug, Default)]
struct Forgetful {
    stack: PageStack<i32, String>,
}

impl PageContainer<i32, String> for Forgetful {
    fn displayed(&self) -> Option<&TaggedPage<i32, String>> {
        self.stack.displayed()
    }

    fn displayed_mut(&mut self) -> Option<&mut TaggedPage<i32, String>> {
        self.stack.displayed_mut()
    }

    fn pending_mut(&mut self) -> Option<&mut TaggedPage<i32, String>> {
        self.stack.pending_mut()
    }

    fn set_current(
        &mut self,
        page: TaggedPage<i32, String>,
        transition: Transition,
        completion: Option<Completion>,
    ) {
        let completion = if transition.animated { None } else { completion };
        self.stack.set_current(page, Transition::immediate(transition.direction), completion);
    }

    fn begin_swipe(&mut self, candidate: TaggedPage<i32, String>, direction: Direction) {
        self.stack.begin_swipe(candidate, direction);
    }

    fn end_swipe(&mut self, completed: bool) {
        self.stack.end_swipe(completed);
    }

    fn is_animating(&self) -> bool {
        false
    }
}

#[test]
fn test_dropped_completion_does_not_wedge_jump() {
    let binding = SelectionBinding::new(0);
    let log = EventLog::new();
    let mut pager = PagingCoordinator::new(
        binding.clone(),
        Navigator::<i32>::counting(),
        |n: &i32| format!("Page {n}"),
        Forgetful::default(),
    )
    .with_callbacks(log.callbacks());

    binding.set(5);
    pager.reconcile();
    pager.run_until_idle();

    assert_eq!(pager.phase(), PagingPhase::Idle);
    assert!(pager.is_settled());
    assert_eq!(pager.displayed_tag(), Some(5));
    assert_eq!(log.events(), vec![PageEvent::WillChange(5), PageEvent::Changed(5)]);
    assert_eq!(pager.begin_swipe(Direction::Forward), Ok(()));
}
