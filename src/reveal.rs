use crate::dom::ElementHandle;

pub const REVEAL_TARGETS: &str = ".family-card, .place-card, .welcome-card, .trip-section";
const REPEATING_CLASS: &str = "family-card";

const HIDDEN_OFFSET: &str = "translateY(30px)";
const SETTLED_OFFSET: &str = "translateY(0)";
const TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Keep,
    Stop,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RevealAnimator;

impl RevealAnimator {
    pub fn prepare<E: ElementHandle>(&self, element: &E) {
        element.set_style("opacity", "0");
        element.set_style("transform", HIDDEN_OFFSET);
        element.set_style("transition", TRANSITION);
    }

    pub fn on_intersection<E: ElementHandle>(&self, element: &E, intersecting: bool) -> Observation {
        let repeating = element.has_class(REPEATING_CLASS);
        if !intersecting {
            if repeating {
                element.set_style("opacity", "0");
                element.set_style("transform", HIDDEN_OFFSET);
            }
            return Observation::Keep;
        }
        element.set_style("opacity", "1");
        element.set_style("transform", SETTLED_OFFSET);
        if repeating {
            Observation::Keep
        } else {
            Observation::Stop
        }
    }
}
