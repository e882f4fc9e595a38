use std::sync::LazyLock;

use bevy::prelude::*;
use parking_lot::Mutex;
use ribbit_bits::{BitDuration, BitMessage, BitParameters, BitResult, RibbitMessage};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

/// A process-wide FIFO shared between the browser callbacks and the Bevy world.
pub struct MessageQueue<T> {
    inner: Mutex<Vec<T>>,
}

impl<T> MessageQueue<T> {
    const fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, message: T) {
        self.inner.lock().push(message);
    }

    pub fn drain(&self) -> Vec<T> {
        core::mem::take(&mut *self.inner.lock())
    }
}

/// Messages received from the Ribbit host, processed once per frame.
pub static RIBBIT_INBOX: LazyLock<MessageQueue<RibbitMessage>> = LazyLock::new(MessageQueue::new);

#[cfg(target_arch = "wasm32")]
fn listen_ribbit_messages() {
    let Some(window) = web_sys::window() else {
        error!("No global window, Ribbit messages will not be received");
        return;
    };

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        match serde_wasm_bindgen::from_value::<RibbitMessage>(event.data()) {
            Ok(message) => RIBBIT_INBOX.push(message),
            Err(err) => error!("Could not parse ribbit message {:?}: {err}", event.data()),
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Err(err) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to add message event listener: {err:?}");
        return;
    }

    // The listener lives as long as the page.
    closure.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_bit_message(message: BitMessage) {
    // No host outside the browser
    debug!("Bit message {message:?}");
}

#[cfg(target_arch = "wasm32")]
pub fn send_bit_message(message: BitMessage) {
    let Some(window) = web_sys::window() else {
        error!("{message:?} not sent, no global window");
        return;
    };
    let Ok(payload) = serde_wasm_bindgen::to_value(&message) else {
        error!("Could not serialize {message:?}");
        return;
    };
    let Ok(Some(parent_window)) = window.parent() else {
        error!("{message:?} not sent, parent window not found");
        return;
    };

    if let Err(err) = parent_window.post_message(&payload, "*") {
        error!("Could not post message {payload:?}. {err:?}");
    }
}

/// Hooks the Ribbit host calls into the bit. Not meant to be called by the bit itself.
pub trait RibbitMessageHandler: Send + Sync + Default + 'static {
    fn duration(world: &mut World) -> BitDuration;
    fn end(world: &mut World) -> BitResult;
    fn restart(world: &mut World);
}

fn process_ribbit_messages<T: RibbitMessageHandler>(world: &mut World) {
    for message in RIBBIT_INBOX.drain() {
        match message {
            RibbitMessage::End => {
                let result = T::end(world);
                send_bit_message(BitMessage::End(result));
            }
            RibbitMessage::Parameters => {
                let duration = T::duration(world);
                send_bit_message(BitMessage::Parameters(BitParameters { duration }));
            }
            RibbitMessage::Restart => T::restart(world),
            RibbitMessage::Start => info!("Ribbit start"),
        }
    }
}

fn announce_ready() {
    send_bit_message(BitMessage::Ready);
}

#[derive(Default)]
pub struct RibbitCommunicationPlugin<T: RibbitMessageHandler>(core::marker::PhantomData<T>);

impl<T: RibbitMessageHandler> Plugin for RibbitCommunicationPlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, process_ribbit_messages::<T>);
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, listen_ribbit_messages);
        app.add_systems(PostStartup, announce_ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_arrival_order() {
        let queue = MessageQueue::new();
        queue.push(1);
        queue.push(2);

        assert_eq!(queue.drain(), vec![1, 2], "messages come out in order");
        assert!(queue.drain().is_empty(), "draining empties the queue");
    }

    #[derive(Resource, Default)]
    struct Restarts(u32);

    #[derive(Default)]
    struct CountingBit;

    impl RibbitMessageHandler for CountingBit {
        fn duration(_world: &mut World) -> BitDuration {
            BitDuration::max_duration()
        }

        fn end(_world: &mut World) -> BitResult {
            BitResult::Failure
        }

        fn restart(world: &mut World) {
            world.resource_mut::<Restarts>().0 += 1;
        }
    }

    #[test]
    fn inbox_messages_reach_the_handler() {
        let mut world = World::new();
        world.init_resource::<Restarts>();

        RIBBIT_INBOX.push(RibbitMessage::Restart);
        RIBBIT_INBOX.push(RibbitMessage::End);
        process_ribbit_messages::<CountingBit>(&mut world);

        assert_eq!(world.resource::<Restarts>().0, 1, "restart reached the bit");
        assert!(RIBBIT_INBOX.drain().is_empty(), "every message was consumed");
    }
}
