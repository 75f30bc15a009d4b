use crate::modules::auth::repository::Session;
use crate::modules::menu::repository::MenuItem;
use crate::modules::order::repository::Order;

/// Published by the services after every persisted mutation so renderers and
/// read-side projections can recompute. Keeps the state-transition layer free
/// of any rendering surface.
#[derive(Clone, Debug)]
pub enum ViewEvent {
    SessionChanged(Option<Session>),
    MenuChanged(Vec<MenuItem>),
    CartChanged(usize),
    OrdersChanged(Vec<Order>),
}

type Subscriber = Box<dyn FnMut(&ViewEvent)>;

#[derive(Default)]
pub struct ViewHub {
    subscribers: Vec<Subscriber>,
}

impl ViewHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ViewEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn publish(&mut self, event: &ViewEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn all_subscribers_observe_every_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hub = ViewHub::new();
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            hub.subscribe(move |event| {
                if let ViewEvent::CartChanged(count) = event {
                    seen.borrow_mut().push(*count);
                }
            });
        }

        hub.publish(&ViewEvent::CartChanged(3));
        assert_eq!(*seen.borrow(), vec![3, 3]);
    }
}
