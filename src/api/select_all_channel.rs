use std::rc::Rc;

use tracing::{debug, trace};

use crate::extensions::EventBus;
use crate::render::Renderer;

use super::ChartEngine;

/// Broadcast topic that selects every marker of chart `chart_id`.
#[must_use]
pub fn select_all_topic(chart_id: &str) -> String {
    format!("{chart_id}-selectAll")
}

impl<R: Renderer + 'static> ChartEngine<R> {
    /// Subscribes to the select-all topic on the process-wide bus.
    pub fn mount(&mut self) {
        self.mount_on(&EventBus::global());
    }

    /// Subscribes to the select-all topic on `bus`, replacing any previous
    /// subscription.
    pub fn mount_on(&mut self, bus: &EventBus) {
        let topic = select_all_topic(&self.chart_id);
        let scene = Rc::downgrade(&self.scene);
        let chart_id = self.chart_id.clone();
        let subscription = bus.on(topic.clone(), move |_payload| {
            let Some(scene) = scene.upgrade() else {
                trace!(chart_id = %chart_id, "select all for a dropped chart ignored");
                return;
            };
            scene.select_all();
        });
        debug!(topic = %topic, "chart mounted");
        self.select_all_subscription = Some(subscription);
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Tears down the select-all subscription.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.select_all_subscription.take() {
            debug!(topic = %subscription.topic(), "chart unmounted");
            subscription.unsubscribe();
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.select_all_subscription
            .as_ref()
            .is_some_and(|subscription| subscription.is_active())
    }
}
