use std::rc::Rc;

use crate::dom::ElementHandle;
use crate::schedule::{Scheduler, TransitionClock};

pub const FAMILY_GRID: &str = ".family-grid";
pub const FAMILY_CARD: &str = ".family-card";
pub const PAGE_DOT: &str = ".page-dot";
pub const PREV_BUTTON_ID: &str = "prevBtn";
pub const NEXT_BUTTON_ID: &str = "nextBtn";
pub const PAGE_ATTRIBUTE: &str = "data-page";
const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Copy, Debug)]
pub struct PagerTiming {
    pub show_delay_ms: u32,
    pub activate_delay_ms: u32,
}

impl Default for PagerTiming {
    fn default() -> Self {
        Self {
            show_delay_ms: 100,
            activate_delay_ms: 50,
        }
    }
}

pub struct FamilyPager<E: ElementHandle> {
    cards: Vec<E>,
    dots: Vec<E>,
    prev: Option<E>,
    next: Option<E>,
    current: u32,
    total_pages: u32,
    timing: PagerTiming,
    scheduler: Rc<dyn Scheduler>,
    clock: TransitionClock,
}

impl<E: ElementHandle> FamilyPager<E> {
    pub fn new(
        cards: Vec<E>,
        dots: Vec<E>,
        prev: Option<E>,
        next: Option<E>,
        total_pages: u32,
        timing: PagerTiming,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            cards,
            dots,
            prev,
            next,
            current: 1,
            total_pages: total_pages.max(1),
            timing,
            scheduler,
            clock: TransitionClock::default(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current
    }

    pub fn start(&mut self) {
        self.refresh();
    }

    pub fn change_page(&mut self, direction: i32) -> bool {
        let target = i64::from(self.current) + i64::from(direction);
        if target < 1 || target > i64::from(self.total_pages) {
            return false;
        }
        self.current = target as u32;
        tracing::debug!("family: page {}", self.current);
        self.refresh();
        true
    }

    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.current = page;
        tracing::debug!("family: jump to page {page}");
        self.refresh();
        true
    }

    fn refresh(&self) {
        self.render(self.current);
        self.update_nav_controls();
        self.update_indicator();
    }

    pub fn render(&self, page: u32) {
        for card in &self.cards {
            card.remove_class(ACTIVE_CLASS);
            card.hide();
        }

        let token = self.clock.advance();
        let members: Vec<E> = self
            .cards
            .iter()
            .filter(|card| card_page(*card) == Some(page))
            .cloned()
            .collect();
        let scheduler = self.scheduler.clone();
        let activate_delay = self.timing.activate_delay_ms;
        self.scheduler.defer(
            self.timing.show_delay_ms,
            Box::new(move || {
                if !token.is_current() {
                    return;
                }
                for card in &members {
                    card.show("block");
                }
                scheduler.defer(
                    activate_delay,
                    Box::new(move || {
                        if !token.is_current() {
                            return;
                        }
                        for card in &members {
                            card.add_class(ACTIVE_CLASS);
                        }
                    }),
                );
            }),
        );
    }

    pub fn update_nav_controls(&self) {
        if let Some(prev) = &self.prev {
            prev.set_disabled(self.current == 1);
        }
        if let Some(next) = &self.next {
            next.set_disabled(self.current == self.total_pages);
        }
    }

    pub fn update_indicator(&self) {
        for (index, dot) in self.dots.iter().enumerate() {
            if index + 1 == self.current as usize {
                dot.add_class(ACTIVE_CLASS);
            } else {
                dot.remove_class(ACTIVE_CLASS);
            }
        }
    }
}

fn card_page<E: ElementHandle>(card: &E) -> Option<u32> {
    card.attribute(PAGE_ATTRIBUTE)
        .and_then(|value| value.trim().parse::<u32>().ok())
}
