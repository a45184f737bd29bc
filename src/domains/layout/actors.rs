// Layout actors - forwards committed layout events to listeners
use super::events::LayoutEvent;
use tokio::sync::mpsc;

pub struct LayoutEventPublisher {
    event_sender: mpsc::Sender<LayoutEvent>,
}

impl LayoutEventPublisher {
    pub fn new(event_sender: mpsc::Sender<LayoutEvent>) -> Self {
        Self { event_sender }
    }

    pub async fn publish(&self, events: Vec<LayoutEvent>) -> Result<(), String> {
        for event in events {
            self.event_sender
                .send(event)
                .await
                .map_err(|e| format!("Failed to send event: {}", e))?;
        }
        Ok(())
    }
}
