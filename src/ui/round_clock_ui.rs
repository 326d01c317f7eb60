// clock label for the round in progress

use std::{cell::RefCell, rc::Rc, time::Duration};

use glib::{timeout_add_local, ControlFlow, SourceId};
use gtk4::{prelude::WidgetExt, Label};

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::{RoundEvent, TimerState};

pub struct RoundClockUI {
    timer_state: TimerState,
    pub clock_label: Label,
    tick: Option<SourceId>,
    subscription: Option<Unsubscriber<RoundEvent>>,
}

impl Destroyable for RoundClockUI {
    fn destroy(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl RoundClockUI {
    pub fn new(round_event_observer: EventObserver<RoundEvent>) -> Rc<RefCell<Self>> {
        let clock_label = Label::new(None);
        clock_label.add_css_class("round-clock");

        let timer_state = TimerState::default();
        RoundClockUI::update_clock_label(&clock_label, &timer_state);

        let clock = Rc::new(RefCell::new(Self {
            timer_state,
            clock_label,
            tick: None,
            subscription: None,
        }));

        RoundClockUI::bind_observer(clock.clone(), round_event_observer);

        clock
    }

    fn bind_observer(clock: Rc<RefCell<Self>>, round_event_observer: EventObserver<RoundEvent>) {
        let subscription = {
            let clock = clock.clone();
            round_event_observer.subscribe(move |event| {
                if let RoundEvent::TimerStateChanged(timer_state) = event {
                    let clock_rc = clock.clone();
                    clock.borrow_mut().update_timer_state(clock_rc, timer_state);
                }
            })
        };

        clock.borrow_mut().subscription = Some(subscription);
    }

    fn update_timer_state(&mut self, clock: Rc<RefCell<Self>>, new_timer_state: &TimerState) {
        self.timer_state = new_timer_state.clone();
        RoundClockUI::update_clock_label(&self.clock_label, &self.timer_state);
        if self.timer_state.is_running() {
            self.restart_tick(clock);
        } else {
            self.cancel_tick();
        }
    }

    fn cancel_tick(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
    }

    /// Every round gets a fresh source; the previous one is removed first so
    /// a stale tick can never fire for a finished round.
    fn restart_tick(&mut self, clock: Rc<RefCell<Self>>) {
        self.cancel_tick();
        let clock_weak = Rc::downgrade(&clock);
        let tick = timeout_add_local(Duration::from_secs(1), move || {
            if let Some(clock) = clock_weak.upgrade() {
                let clock = clock.borrow();
                RoundClockUI::update_clock_label(&clock.clock_label, &clock.timer_state);
                ControlFlow::Continue
            } else {
                ControlFlow::Break
            }
        });
        self.tick = Some(tick);
    }

    fn update_clock_label(clock_label: &Label, timer_state: &TimerState) {
        clock_label.set_text(&timer_state.clock());
    }
}

impl Drop for RoundClockUI {
    fn drop(&mut self) {
        log::trace!(target: "round_clock_ui", "Dropping RoundClockUI");

        if let Some(tick) = self.tick.take() {
            tick.remove();
        }
    }
}
