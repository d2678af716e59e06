//! Dispatch engine
//!
//! The two host entry points. Each call runs as one critical section on the
//! shared document: side-effect hooks, registry mappings, derived
//! recomputation, then at most one notification. Nothing raised while
//! applying an update leaves this module; unmapped identifiers are traced
//! and rejected values are logged and dropped.

use crate::config::{GameVariant, GearTarget, TelemetryConfig};
use crate::convert::{game_time_base, json_time, minutes_from_base, remaining_time, with_bit};
use crate::derived;
use crate::document::{Document, EventFlag, WritePath};
use crate::job::{JobState, JobTracker};
use crate::monitor::SharedDocument;
use crate::registry::ids::attribute;
use crate::registry::{
    ChannelHook, ChannelRoute, EventRoute, EventTarget, GameplayAction, Mapping, Recompute, Registry,
    SideEffect,
};
use crate::types::{Attribute, EventKind, GameTime, Value};
use log::{debug, trace};
use std::sync::Arc;

/// State carried between callbacks, owned by the dispatcher
#[derive(Debug)]
struct Context {
    variant: GameVariant,
    gear_target: GearTarget,
    clear_detached_trailers: bool,
    /// Game clock as last reported by the host
    game_time: GameTime,
    /// Delivery deadline of the active job
    deadline: GameTime,
    /// Raw truck speed in m/s
    last_speed: f64,
    jobs: JobTracker,
}

/// Applies raw host callbacks to the shared document
#[derive(Debug)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    shared: Arc<SharedDocument>,
    context: Context,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<Registry>,
        shared: Arc<SharedDocument>,
        variant: GameVariant,
        config: &TelemetryConfig,
    ) -> Self {
        Self {
            registry,
            shared,
            context: Context {
                variant,
                gear_target: config.gear_target(),
                clear_detached_trailers: config.clear_detached_trailers,
                game_time: game_time_base(),
                deadline: game_time_base(),
                last_speed: 0.0,
                jobs: JobTracker::new(),
            },
        }
    }

    pub fn shared(&self) -> &Arc<SharedDocument> {
        &self.shared
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn job_state(&self) -> JobState {
        self.context.jobs.state()
    }

    /// Bring every derived value in line with the current raw values
    pub fn refresh_derived(&mut self) {
        let context = &self.context;
        self.shared.update(|doc| {
            derived::refresh_gear_names(doc, context.variant);
            derived::refresh_tyre_circumference(doc);
            derived::refresh_slot_count(doc);
            derived::refresh_shifter_tables(doc, context.last_speed, &context.gear_target);
            derived::recount_trailers(doc);
            true
        });
    }

    /// Continuous channel callback
    ///
    /// `index` is the host's per-index subscription (wheel, selector bit),
    /// `None` for plain channels.
    pub fn apply_channel_update(&mut self, channel: &str, index: Option<usize>, value: Value) {
        let Some(route) = self.registry.channel(channel) else {
            trace!("Unmapped channel {}", channel);
            return;
        };

        let context = &mut self.context;
        self.shared
            .update(|doc| context.apply_channel(doc, channel, route, index, value));
    }

    /// Discrete event callback
    pub fn apply_event(&mut self, kind: EventKind, id: &str, attributes: &[Attribute]) {
        match kind {
            EventKind::Started | EventKind::Paused => {
                let paused = kind == EventKind::Paused;
                debug!("Game {}", kind);
                self.shared.update(|doc| {
                    doc.game.paused = paused;
                    true
                });
            }
            EventKind::Configuration | EventKind::Gameplay => {
                if self.registry.is_ignored_event(id) {
                    trace!("Ignoring legacy event {}", id);
                    return;
                }

                let route = self.registry.event(id);
                let action = match kind {
                    EventKind::Gameplay => self.registry.gameplay(id),
                    _ => None,
                };
                if route.is_none() && action.is_none() {
                    trace!("Unmapped {} event {}", kind, id);
                    return;
                }

                let registry = &self.registry;
                let context = &mut self.context;
                self.shared.update(|doc| {
                    if let Some(route) = route {
                        context.apply_attributes(doc, registry, id, route, attributes);
                    }
                    if let Some(action) = action {
                        context.apply_gameplay(doc, action);
                    }
                    true
                });
            }
        }
    }
}

/// Validated side effect of a channel hook, applied only once every
/// mapping of the channel has accepted the value
#[derive(Debug, Clone, Copy)]
enum HookEffect {
    GameTime(GameTime),
    DashboardBacklight(bool),
    CruiseControl(bool),
    Speed(f64),
    DisplayedGear(i64),
    SelectorBit { bit: usize, on: bool },
}

/// `None` rejects the whole channel update
fn prepare_hook(hook: ChannelHook, index: Option<usize>, value: &Value) -> Option<HookEffect> {
    let finite = || value.as_f64().filter(|v| v.is_finite());
    match hook {
        ChannelHook::GameTime => value.as_i64().and_then(minutes_from_base).map(HookEffect::GameTime),
        ChannelHook::DashboardBacklight => finite().map(|v| HookEffect::DashboardBacklight(v > 0.0)),
        ChannelHook::CruiseControl => finite().map(|v| HookEffect::CruiseControl(v > 0.0)),
        ChannelHook::Speed => finite().map(HookEffect::Speed),
        ChannelHook::DisplayedGear => value.as_i64().map(HookEffect::DisplayedGear),
        ChannelHook::HShifterSelector => match index {
            Some(bit) => Some(HookEffect::SelectorBit { bit, on: value.as_bool() }),
            None => {
                debug!("Selector update without an index");
                None
            }
        },
    }
}

fn convert(mapping: &Mapping, value: Value, game_time: GameTime) -> Option<Value> {
    match mapping.converter() {
        Some(converter) => converter.apply(value, game_time),
        None => Some(value),
    }
}

impl Context {
    fn apply_channel(
        &mut self,
        doc: &mut Document,
        channel: &str,
        route: &ChannelRoute,
        index: Option<usize>,
        value: Value,
    ) -> bool {
        let effect = match route.hook {
            Some(hook) => match prepare_hook(hook, index, &value) {
                Some(effect) => Some(effect),
                None => {
                    debug!("Rejected {} value {} on {}", value.kind(), value, channel);
                    return false;
                }
            },
            None => None,
        };

        // Every mapping converts before anything is written
        let game_time = match effect {
            Some(HookEffect::GameTime(now)) => now,
            _ => self.game_time,
        };
        let mut converted = Vec::with_capacity(route.mappings.len());
        for mapping in route.mappings {
            let Some(out) = convert(mapping, value.clone(), game_time) else {
                debug!("Rejected {} value {} on {}", value.kind(), value, channel);
                return false;
            };
            converted.push((mapping, out));
        }

        let mut changed = false;
        if let Some(effect) = effect {
            self.apply_hook(doc, effect);
            changed = true;
        }
        for (mapping, value) in converted {
            changed |= self.write(doc, mapping, route.trailer, index, value);
        }

        if route.hook == Some(ChannelHook::Speed) {
            derived::refresh_shifter_tables(doc, self.last_speed, &self.gear_target);
        }
        if changed && route.trailer.is_some() {
            derived::recount_trailers(doc);
        }
        changed
    }

    fn apply_hook(&mut self, doc: &mut Document, effect: HookEffect) {
        match effect {
            HookEffect::GameTime(now) => {
                self.game_time = now;
                doc.job.remaining_time = json_time(remaining_time(now, self.deadline));
            }
            HookEffect::DashboardBacklight(on) => doc.truck.lights_dashboard_on = on,
            HookEffect::CruiseControl(on) => doc.truck.cruise_control_on = on,
            HookEffect::Speed(speed) => self.last_speed = speed,
            HookEffect::DisplayedGear(gear) => {
                doc.shifter.displayed_gear_name = derived::displayed_gear_name(&doc.shifter, gear);
            }
            HookEffect::SelectorBit { bit, on } => {
                doc.shifter.selector = with_bit(doc.shifter.selector, bit, on);
            }
        }
    }

    /// Compose the destination of one mapping and write to it
    fn write(
        &self,
        doc: &mut Document,
        mapping: &Mapping,
        trailer: Option<usize>,
        index: Option<usize>,
        value: Value,
    ) -> bool {
        let path = mapping.path();
        let index = if mapping.uses_index() {
            match index {
                Some(index) => Some(index),
                None => {
                    debug!("Missing index for {}.{}", path.section.name(), path.field);
                    return false;
                }
            }
        } else {
            None
        };

        let target = WritePath {
            section: path.section,
            trailer,
            field: path.field,
            index,
            key: mapping.key(),
        };

        match doc.write(&target, value) {
            Ok(()) => true,
            Err(e) => {
                debug!("Dropped write to {}.{}: {}", path.section.name(), path.field, e);
                false
            }
        }
    }

    fn apply_attributes(
        &mut self,
        doc: &mut Document,
        registry: &Registry,
        id: &str,
        route: &EventRoute,
        attributes: &[Attribute],
    ) {
        let mut recompute = Recompute::default();

        match (route.target, route.trailer) {
            (EventTarget::HShifter, _) => {
                doc.shifter.clear_layout();
                recompute.slot_count = true;
            }
            (EventTarget::Trailer, Some(slot)) if attributes.is_empty() && self.clear_detached_trailers => {
                debug!("Trailer {} detached", slot);
                doc.clear_trailer(slot);
            }
            _ => {}
        }

        for attr in attributes {
            let Some(entry) = registry.attribute(route, &attr.name) else {
                trace!("Unmapped attribute {} of {}", attr.name, id);
                continue;
            };

            match (route.target, attr.name.as_str()) {
                (EventTarget::Job, attribute::DELIVERY_TIME) => {
                    if let Some(deadline) = attr.value.as_i64().and_then(minutes_from_base) {
                        self.deadline = deadline;
                    }
                }
                (EventTarget::Trailer, attribute::ID) => {
                    if let Some(slot) = route.trailer {
                        if let Some(trailer) = doc.trailers.get_mut(&slot) {
                            trailer.present = attr.value.is_present();
                        }
                    }
                }
                _ => {}
            }

            for mapping in entry.mappings {
                match convert(mapping, attr.value.clone(), self.game_time) {
                    Some(value) => {
                        self.write(doc, mapping, route.trailer, attr.index, value);
                    }
                    None => debug!("Rejected {} value {} on {}.{}", attr.value.kind(), attr.value, id, attr.name),
                }
            }
            recompute = recompute.union(entry.recompute);
        }

        if recompute.gear_names {
            derived::refresh_gear_names(doc, self.variant);
        }
        if recompute.tyre_circumference {
            derived::refresh_tyre_circumference(doc);
        }
        if recompute.slot_count {
            derived::refresh_slot_count(doc);
        }
        if route.target == EventTarget::Trailer {
            derived::recount_trailers(doc);
        }

        if route.target == EventTarget::Job {
            if self.jobs.on_job_configuration(!attributes.is_empty()) {
                doc.toggle(EventFlag::JobFinished);
                self.deadline = game_time_base();
            }
            doc.job.remaining_time = json_time(remaining_time(self.game_time, self.deadline));
        }

        derived::refresh_shifter_tables(doc, self.last_speed, &self.gear_target);
    }

    fn apply_gameplay(&mut self, doc: &mut Document, action: &GameplayAction) {
        doc.toggle(action.flag);

        if action.finishes_job {
            self.jobs.finish();
            doc.toggle(EventFlag::JobFinished);
        }

        match action.side_effect {
            Some(SideEffect::ResetJob) => {
                doc.reset_job();
                self.deadline = game_time_base();
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ids::{attribute as a, channel, config, gameplay};
    use crate::types::{Euler, Transform, Vector3};
    use std::time::Duration;

    fn dispatcher() -> Dispatcher {
        let shared = Arc::new(SharedDocument::new(Document::new(), Duration::from_millis(10)));
        let mut dispatcher = Dispatcher::new(
            Arc::new(Registry::standard()),
            shared,
            GameVariant::Ets2,
            &TelemetryConfig::default(),
        );
        dispatcher.refresh_derived();
        dispatcher
    }

    fn doc(dispatcher: &Dispatcher) -> Document {
        dispatcher.shared().snapshot()
    }

    #[test]
    fn test_plain_and_converted_channels() {
        let mut d = dispatcher();
        d.apply_channel_update(channel::TRUCK_FUEL, None, Value::Float(412.5));
        d.apply_channel_update(channel::TRUCK_SPEED, None, Value::Float(27.78));
        d.apply_channel_update(channel::TRUCK_LIGHT_AUX_FRONT, None, Value::Integer(2));

        let doc = doc(&d);
        assert_eq!(doc.truck.fuel, 412.5);
        assert_eq!(doc.truck.speed, 100);
        assert!(doc.truck.lights_aux_front_on);
    }

    #[test]
    fn test_unmapped_channel_does_not_notify() {
        let mut d = dispatcher();
        d.shared().consume(|_, _| ());
        d.apply_channel_update("truck.cabin.offset", None, Value::Float(1.0));
        assert!(!d.shared().has_new_data());
    }

    #[test]
    fn test_rejected_placement_leaves_document_untouched() {
        let mut d = dispatcher();
        let before = doc(&d);
        let version = d.shared().version();

        let bad = Transform {
            position: Vector3::new(f64::NAN, 0.0, 0.0),
            orientation: Euler::default(),
        };
        d.apply_channel_update(channel::TRUCK_WORLD_PLACEMENT, None, Value::Transform(bad));

        assert_eq!(doc(&d), before);
        assert_eq!(d.shared().version(), version);
    }

    #[test]
    fn test_indexed_wheel_channel() {
        let mut d = dispatcher();
        d.apply_channel_update(channel::TRUCK_WHEEL_LIFT, Some(3), Value::Float(0.4));
        d.apply_channel_update("trailer.1.wheel.lift", Some(2), Value::Float(0.1));

        let doc = doc(&d);
        assert!(doc.truck.wheels[&3].lifted);
        assert!(doc.trailers[&1].wheels[&2].lifted);
        assert!(!doc.trailers[&0].wheels[&2].lifted);
    }

    #[test]
    fn test_game_time_and_remaining_time() {
        let mut d = dispatcher();
        d.apply_event(
            EventKind::Configuration,
            config::JOB,
            &[Attribute::new(a::CARGO, "Apples"), Attribute::new(a::DELIVERY_TIME, 600i64)],
        );
        d.apply_channel_update(channel::GAME_TIME, None, Value::Integer(480));

        let doc = doc(&d);
        assert_eq!(doc.game.time, "0001-01-01T08:00:00Z");
        assert_eq!(doc.job.deadline_time, "0001-01-01T10:00:00Z");
        assert_eq!(doc.job.remaining_time, "0001-01-01T02:00:00Z");

        d.apply_channel_update(channel::GAME_TIME, None, Value::Integer(700));
        assert_eq!(d.shared().read(|doc| doc.job.remaining_time.clone()), "0001-01-01T00:00:00Z");
    }

    #[test]
    fn test_non_integer_game_time_is_dropped() {
        let mut d = dispatcher();
        d.apply_channel_update(channel::GAME_TIME, None, Value::Integer(480));
        d.shared().consume(|_, _| ());
        let version = d.shared().version();

        d.apply_channel_update(channel::GAME_TIME, None, Value::Text("noon".to_string()));

        assert_eq!(doc(&d).game.time, "0001-01-01T08:00:00Z");
        assert_eq!(d.shared().version(), version);
        assert!(!d.shared().has_new_data());
    }

    #[test]
    fn test_rejected_cruise_control_keeps_flag() {
        let mut d = dispatcher();
        d.apply_channel_update(channel::TRUCK_CRUISE_CONTROL, None, Value::Float(25.0));
        d.apply_channel_update(channel::TRUCK_CRUISE_CONTROL, None, Value::Float(f64::NAN));

        let doc = doc(&d);
        assert!(doc.truck.cruise_control_on);
        assert_eq!(doc.truck.cruise_control_speed, 90);
    }

    #[test]
    fn test_shadows_and_mirrors() {
        let mut d = dispatcher();
        d.apply_channel_update(channel::TRUCK_DASHBOARD_BACKLIGHT, None, Value::Float(0.6));
        d.apply_channel_update(channel::TRUCK_CRUISE_CONTROL, None, Value::Float(25.0));
        d.apply_channel_update(channel::TRUCK_ENGINE_GEAR, None, Value::Integer(4));
        d.apply_channel_update(channel::TRUCK_HSHIFTER_SLOT, None, Value::Integer(2));

        let doc = doc(&d);
        assert!(doc.truck.lights_dashboard_on);
        assert_eq!(doc.truck.lights_dashboard_value, 0.6);
        assert!(doc.truck.cruise_control_on);
        assert_eq!(doc.truck.cruise_control_speed, 90);
        assert_eq!((doc.truck.gear, doc.shifter.gear), (4, 4));
        assert_eq!((doc.truck.shifter_slot, doc.shifter.slot), (2, 2));
    }

    #[test]
    fn test_selector_bits() {
        let mut d = dispatcher();
        d.apply_channel_update(channel::TRUCK_HSHIFTER_SELECTOR, Some(1), Value::Bool(true));
        d.apply_channel_update(channel::TRUCK_HSHIFTER_SELECTOR, Some(0), Value::Bool(true));
        d.apply_channel_update(channel::TRUCK_HSHIFTER_SELECTOR, Some(1), Value::Bool(false));
        assert_eq!(d.shared().read(|doc| doc.shifter.selector), 0b01);
    }

    #[test]
    fn test_hshifter_layout_and_gear_names() {
        let mut d = dispatcher();
        d.apply_event(
            EventKind::Configuration,
            config::CONTROLS,
            &[Attribute::new(a::SHIFTER_TYPE, "hshifter")],
        );
        d.apply_event(
            EventKind::Configuration,
            config::HSHIFTER,
            &[
                Attribute::new(a::SELECTOR_COUNT, 2i64),
                Attribute::indexed(a::SLOT_HANDLE_POSITION, 0, 0i64),
                Attribute::indexed(a::SLOT_HANDLE_POSITION, 7, 3i64),
                Attribute::indexed(a::SLOT_SELECTORS, 7, 2i64),
            ],
        );
        d.apply_channel_update(channel::TRUCK_DISPLAYED_GEAR, None, Value::Integer(2));

        let doc = doc(&d);
        assert_eq!(doc.truck.shifter_type, "hshifter");
        assert_eq!(doc.shifter.shifter_type, "hshifter");
        assert_eq!(doc.shifter.slot_count, 8);
        assert_eq!(doc.shifter.selector_count, 2);
        assert_eq!(doc.shifter.forward_gear_names[&1], "1L");
        assert_eq!(doc.shifter.displayed_gear_name, "1H");
        assert_eq!(doc.shifter.displayed_gear, 2);
    }

    #[test]
    fn test_trailer_configuration_presence() {
        let mut d = dispatcher();
        d.apply_event(
            EventKind::Configuration,
            "trailer.0",
            &[Attribute::new(a::ID, "scs.box"), Attribute::new(a::BRAND, "Krone")],
        );
        d.apply_event(EventKind::Configuration, "trailer.1", &[Attribute::new(a::ID, "")]);

        let snapshot = doc(&d);
        assert!(snapshot.trailers[&0].present);
        assert!(!snapshot.trailers[&1].present);
        assert_eq!(snapshot.trailer_count, 1);
        assert_eq!(snapshot.trailer.brand, "Krone");

        d.apply_event(EventKind::Configuration, "trailer.0", &[]);
        let snapshot = doc(&d);
        assert_eq!(snapshot.trailer_count, 0);
        assert_eq!(snapshot.trailer, snapshot.trailers[&0]);
        assert_eq!(snapshot.trailer.brand, "");
    }

    #[test]
    fn test_legacy_trailer_event_ignored() {
        let mut d = dispatcher();
        let version = d.shared().version();
        d.apply_event(EventKind::Configuration, config::TRAILER, &[Attribute::new(a::ID, "x")]);
        assert_eq!(d.shared().version(), version);
    }

    #[test]
    fn test_job_lifecycle_edges() {
        let mut d = dispatcher();
        d.apply_event(EventKind::Configuration, config::JOB, &[Attribute::new(a::INCOME, 9000i64)]);
        assert_eq!(d.job_state(), JobState::OnJob);
        assert!(!doc(&d).job_event.job_finished);

        d.apply_event(EventKind::Configuration, config::JOB, &[]);
        assert_eq!(d.job_state(), JobState::Idle);
        assert!(doc(&d).job_event.job_finished);

        d.apply_event(EventKind::Configuration, config::JOB, &[]);
        assert!(doc(&d).job_event.job_finished);
    }

    #[test]
    fn test_job_delivered() {
        let mut d = dispatcher();
        d.apply_event(
            EventKind::Configuration,
            config::JOB,
            &[Attribute::new(a::INCOME, 9000i64), Attribute::new(a::CARGO, "Apples")],
        );
        d.apply_event(
            EventKind::Gameplay,
            gameplay::JOB_DELIVERED,
            &[Attribute::new(a::REVENUE, 9100.0), Attribute::new(a::AUTO_PARK_USED, true)],
        );

        let doc = doc(&d);
        assert_eq!(d.job_state(), JobState::Idle);
        assert!(doc.job_event.job_delivered);
        assert!(doc.job_event.job_finished);
        assert!(doc.job_event.autopark_used);
        assert_eq!(doc.job_event.revenue, 9100.0);
        assert_eq!(doc.job.income, 0);
        assert_eq!(doc.cargo.cargo, "");
    }

    #[test]
    fn test_gameplay_event_notifies_once() {
        let mut d = dispatcher();
        let version = d.shared().version();
        d.apply_event(
            EventKind::Gameplay,
            gameplay::PLAYER_USE_FERRY,
            &[
                Attribute::new(a::SOURCE_NAME, "Calais"),
                Attribute::new(a::TARGET_NAME, "Dover"),
                Attribute::new(a::PAY_AMOUNT, 650i64),
            ],
        );

        assert_eq!(d.shared().version(), version + 1);
        let doc = doc(&d);
        assert!(doc.ferry_event.ferry_used);
        assert_eq!(doc.ferry_event.target_name, "Dover");
        assert_eq!(doc.ferry_event.pay_amount, 650.0);
    }

    #[test]
    fn test_started_and_paused() {
        let mut d = dispatcher();
        d.apply_event(EventKind::Started, "", &[]);
        assert!(!doc(&d).game.paused);
        d.apply_event(EventKind::Paused, "", &[]);
        assert!(doc(&d).game.paused);
    }

    #[test]
    fn test_bad_attribute_does_not_stop_batch() {
        let mut d = dispatcher();
        d.apply_event(
            EventKind::Configuration,
            config::TRUCK,
            &[
                Attribute::new(a::FUEL_CAPACITY, f64::INFINITY),
                Attribute::new(a::BRAND, "Scania"),
                Attribute::indexed(a::WHEEL_RADIUS, 40, 0.5),
            ],
        );
        let doc = doc(&d);
        assert_eq!(doc.truck.fuel_capacity, 700.0);
        assert_eq!(doc.truck.make, "Scania");
    }
}
