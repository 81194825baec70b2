use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::order::OrderStatus;

/// Domain events emitted by the services after a successful store mutation.
///
/// Delivery is best-effort: a send failure is logged by the caller and never
/// fails the originating operation. Downstream consumers (notification
/// senders, dashboards) subscribe to the receiving end of the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CustomerCreated(Uuid),
    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: OrderStatus,
        new_status: OrderStatus,
    },
    OrderAssigned {
        order_id: Uuid,
        tailor_id: Uuid,
    },
    StitchingStarted(Uuid),
    StitchingCompleted(Uuid),
    QualityCheckRecorded {
        order_id: Uuid,
        passed: bool,
    },
    OrderDelivered(Uuid),
    OrderCancelled(Uuid),
    TailorOnboarded(Uuid),
}

/// Cloneable handle for publishing [`Event`]s into the application channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Creates a sender/receiver pair with the given channel capacity.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_round_trip_through_channel() {
        let (sender, mut receiver) = EventSender::channel(8);
        let order_id = Uuid::new_v4();

        sender.send(Event::OrderCreated(order_id)).await.unwrap();
        sender
            .send(Event::QualityCheckRecorded {
                order_id,
                passed: true,
            })
            .await
            .unwrap();

        assert!(matches!(
            receiver.recv().await,
            Some(Event::OrderCreated(id)) if id == order_id
        ));
        assert!(matches!(
            receiver.recv().await,
            Some(Event::QualityCheckRecorded { passed: true, .. })
        ));
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (sender, receiver) = EventSender::channel(1);
        drop(receiver);
        let result = sender.send(Event::OrderCancelled(Uuid::new_v4())).await;
        assert!(result.is_err());
    }
}
