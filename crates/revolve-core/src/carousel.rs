//! Shared-handle carousel: an engine plus its group membership.
//!
//! The engine itself knows nothing about ownership; this wrapper holds it
//! behind `Rc<RefCell<_>>` so a group subscription can reach back into it
//! when a sibling instance broadcasts a navigation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{CarouselEngine, GroupBinding};
use crate::group::{GroupRegistry, HandlerId};

pub struct Carousel {
    engine: Rc<RefCell<CarouselEngine>>,
    registry: Rc<GroupRegistry>,
    subscription: Option<(String, HandlerId)>,
}

impl Carousel {
    pub fn new(engine: CarouselEngine, registry: Rc<GroupRegistry>) -> Self {
        Self {
            engine: Rc::new(RefCell::new(engine)),
            registry,
            subscription: None,
        }
    }

    pub fn engine(&self) -> &Rc<RefCell<CarouselEngine>> {
        &self.engine
    }

    pub fn group(&self) -> Option<&str> {
        self.subscription.as_ref().map(|(name, _)| name.as_str())
    }

    /// Join `group`, leaving the current one first; `None` just leaves.
    /// Broadcasts carry the raw requested index and every member clamps
    /// against its own bounds.
    pub fn set_group(&mut self, group: Option<&str>) {
        if let Some((name, id)) = self.subscription.take() {
            self.registry.unsubscribe(&name, id);
            self.engine.borrow_mut().set_group_binding(None);
            tracing::debug!(group = %name, "left carousel group");
        }

        let Some(name) = group else { return };

        // The handler holds a weak reference: a dropped carousel must not
        // be kept alive by its own group channel.
        let engine = Rc::downgrade(&self.engine);
        let id = self.registry.subscribe(
            name,
            Rc::new(move |index| {
                if let Some(engine) = engine.upgrade() {
                    engine.borrow_mut().slide_from_group(index);
                }
            }),
        );

        self.engine
            .borrow_mut()
            .set_group_binding(Some(GroupBinding {
                registry: Rc::clone(&self.registry),
                name: name.to_string(),
                id,
            }));
        self.subscription = Some((name.to_string(), id));
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        if let Some((name, id)) = self.subscription.take() {
            self.registry.unsubscribe(&name, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Breakpoints, CarouselOptions, ConfigResolver, OptionsPatch};
    use crate::slides::SlideDescriptor;
    use std::time::Instant;

    fn carousel(count: usize, settings: OptionsPatch, registry: &Rc<GroupRegistry>) -> Carousel {
        let resolver = ConfigResolver::new(CarouselOptions::default(), settings, Breakpoints::default());
        let mut engine = CarouselEngine::new(resolver);
        engine.set_slides(
            (0..count)
                .map(|i| SlideDescriptor::new(format!("Slide {}", i + 1)))
                .collect(),
        );
        engine.mount(Instant::now(), false, 800.0, 800.0, 200.0);
        let mut carousel = Carousel::new(engine, Rc::clone(registry));
        carousel.engine().borrow_mut().take_events();
        carousel
    }

    #[test]
    fn test_group_members_follow_the_source() {
        let registry = GroupRegistry::new();
        let mut hero = carousel(5, OptionsPatch::default(), &registry);
        let mut thumbs = carousel(5, OptionsPatch::default(), &registry);
        hero.set_group(Some("gallery"));
        thumbs.set_group(Some("gallery"));

        hero.engine().borrow_mut().slide_to(3);

        assert_eq!(hero.engine().borrow().current_slide(), 3);
        assert_eq!(thumbs.engine().borrow().current_slide(), 3);
        // The follower emitted its own slide events
        let events = thumbs.engine().borrow_mut().take_events();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_followers_clamp_independently() {
        let registry = GroupRegistry::new();
        let mut hero = carousel(5, OptionsPatch::default(), &registry);
        let settings = OptionsPatch {
            trim_white_space: Some(true),
            items_to_show: Some(2.0),
            ..Default::default()
        };
        let mut thumbs = carousel(5, settings, &registry);
        hero.set_group(Some("gallery"));
        thumbs.set_group(Some("gallery"));

        hero.engine().borrow_mut().slide_to(4);

        assert_eq!(hero.engine().borrow().current_slide(), 4);
        // Raw index 4 clamps to the follower's trimmed range
        assert_eq!(thumbs.engine().borrow().current_slide(), 3);
    }

    #[test]
    fn test_leaving_a_group_stops_following() {
        let registry = GroupRegistry::new();
        let mut hero = carousel(5, OptionsPatch::default(), &registry);
        let mut thumbs = carousel(5, OptionsPatch::default(), &registry);
        hero.set_group(Some("gallery"));
        thumbs.set_group(Some("gallery"));

        thumbs.set_group(None);
        hero.engine().borrow_mut().slide_to(2);

        assert_eq!(thumbs.engine().borrow().current_slide(), 0);
        assert_eq!(registry.subscriber_count("gallery"), 1);
    }

    #[test]
    fn test_reassigning_groups() {
        let registry = GroupRegistry::new();
        let mut a = carousel(5, OptionsPatch::default(), &registry);
        let mut b = carousel(5, OptionsPatch::default(), &registry);
        a.set_group(Some("one"));
        b.set_group(Some("one"));

        b.set_group(Some("two"));
        assert_eq!(b.group(), Some("two"));
        assert_eq!(registry.subscriber_count("one"), 1);

        a.engine().borrow_mut().slide_to(2);
        assert_eq!(b.engine().borrow().current_slide(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let registry = GroupRegistry::new();
        let mut a = carousel(5, OptionsPatch::default(), &registry);
        a.set_group(Some("gallery"));
        assert_eq!(registry.subscriber_count("gallery"), 1);

        drop(a);
        assert_eq!(registry.subscriber_count("gallery"), 0);
    }

    #[test]
    fn test_follower_while_sliding_ignores_broadcast() {
        let registry = GroupRegistry::new();
        let mut hero = carousel(5, OptionsPatch::default(), &registry);
        let mut thumbs = carousel(5, OptionsPatch::default(), &registry);
        // Mid-transition before joining the group
        thumbs.engine().borrow_mut().slide_to(1);

        hero.set_group(Some("gallery"));
        thumbs.set_group(Some("gallery"));
        hero.engine().borrow_mut().slide_to(3);

        assert_eq!(hero.engine().borrow().current_slide(), 3);
        assert_eq!(thumbs.engine().borrow().current_slide(), 1);
    }
}
