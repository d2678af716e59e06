//! Raw identifiers used by the host for channels, events and attributes

/// Continuous channels
pub mod channel {
    pub const GAME_TIME: &str = "game.time";
    pub const LOCAL_SCALE: &str = "local.scale";
    pub const NEXT_REST_STOP: &str = "rest.stop";

    pub const JOB_CARGO_DAMAGE: &str = "job.cargo.damage";

    pub const TRUCK_ADBLUE: &str = "truck.adblue";
    pub const TRUCK_ADBLUE_WARNING: &str = "truck.adblue.warning";
    pub const TRUCK_BATTERY_VOLTAGE: &str = "truck.battery.voltage";
    pub const TRUCK_BATTERY_VOLTAGE_WARNING: &str = "truck.battery.voltage.warning";
    pub const TRUCK_BRAKE_AIR_PRESSURE: &str = "truck.brake.air.pressure";
    pub const TRUCK_BRAKE_AIR_PRESSURE_WARNING: &str = "truck.brake.air.pressure.warning";
    pub const TRUCK_BRAKE_AIR_PRESSURE_EMERGENCY: &str = "truck.brake.air.pressure.emergency";
    pub const TRUCK_BRAKE_TEMPERATURE: &str = "truck.brake.temperature";
    pub const TRUCK_CRUISE_CONTROL: &str = "truck.cruise_control";
    pub const TRUCK_DASHBOARD_BACKLIGHT: &str = "truck.dashboard.backlight";
    pub const TRUCK_DISPLAYED_GEAR: &str = "truck.displayed.gear";
    pub const TRUCK_EFFECTIVE_BRAKE: &str = "truck.effective.brake";
    pub const TRUCK_EFFECTIVE_CLUTCH: &str = "truck.effective.clutch";
    pub const TRUCK_EFFECTIVE_STEERING: &str = "truck.effective.steering";
    pub const TRUCK_EFFECTIVE_THROTTLE: &str = "truck.effective.throttle";
    pub const TRUCK_ELECTRIC_ENABLED: &str = "truck.electric.enabled";
    pub const TRUCK_ENGINE_ENABLED: &str = "truck.engine.enabled";
    pub const TRUCK_ENGINE_GEAR: &str = "truck.engine.gear";
    pub const TRUCK_ENGINE_RPM: &str = "truck.engine.rpm";
    pub const TRUCK_FUEL: &str = "truck.fuel.amount";
    pub const TRUCK_FUEL_AVERAGE_CONSUMPTION: &str = "truck.fuel.consumption.average";
    pub const TRUCK_FUEL_WARNING: &str = "truck.fuel.warning";
    pub const TRUCK_HAZARD_WARNING: &str = "truck.hazard.warning";
    pub const TRUCK_HSHIFTER_SELECTOR: &str = "truck.hshifter.select";
    pub const TRUCK_HSHIFTER_SLOT: &str = "truck.hshifter.slot";
    pub const TRUCK_INPUT_BRAKE: &str = "truck.input.brake";
    pub const TRUCK_INPUT_CLUTCH: &str = "truck.input.clutch";
    pub const TRUCK_INPUT_STEERING: &str = "truck.input.steering";
    pub const TRUCK_INPUT_THROTTLE: &str = "truck.input.throttle";
    pub const TRUCK_LBLINKER: &str = "truck.lblinker";
    pub const TRUCK_RBLINKER: &str = "truck.rblinker";
    pub const TRUCK_LIGHT_AUX_FRONT: &str = "truck.light.aux.front";
    pub const TRUCK_LIGHT_AUX_ROOF: &str = "truck.light.aux.roof";
    pub const TRUCK_LIGHT_BEACON: &str = "truck.light.beacon";
    pub const TRUCK_LIGHT_BRAKE: &str = "truck.light.brake";
    pub const TRUCK_LIGHT_HIGH_BEAM: &str = "truck.light.beam.high";
    pub const TRUCK_LIGHT_LOW_BEAM: &str = "truck.light.beam.low";
    pub const TRUCK_LIGHT_LBLINKER: &str = "truck.light.lblinker";
    pub const TRUCK_LIGHT_RBLINKER: &str = "truck.light.rblinker";
    pub const TRUCK_LIGHT_PARKING: &str = "truck.light.parking";
    pub const TRUCK_LIGHT_REVERSE: &str = "truck.light.reverse";
    pub const TRUCK_LOCAL_LINEAR_ACCELERATION: &str = "truck.local.acceleration.linear";
    pub const TRUCK_MOTOR_BRAKE: &str = "truck.brake.motor";
    pub const TRUCK_NAVIGATION_DISTANCE: &str = "truck.navigation.distance";
    pub const TRUCK_NAVIGATION_SPEED_LIMIT: &str = "truck.navigation.speed.limit";
    pub const TRUCK_NAVIGATION_TIME: &str = "truck.navigation.time";
    pub const TRUCK_ODOMETER: &str = "truck.odometer";
    pub const TRUCK_OIL_PRESSURE: &str = "truck.oil.pressure";
    pub const TRUCK_OIL_PRESSURE_WARNING: &str = "truck.oil.pressure.warning";
    pub const TRUCK_OIL_TEMPERATURE: &str = "truck.oil.temperature";
    pub const TRUCK_PARKING_BRAKE: &str = "truck.brake.parking";
    pub const TRUCK_RETARDER_LEVEL: &str = "truck.brake.retarder";
    pub const TRUCK_SPEED: &str = "truck.speed";
    pub const TRUCK_WATER_TEMPERATURE: &str = "truck.water.temperature";
    pub const TRUCK_WATER_TEMPERATURE_WARNING: &str = "truck.water.temperature.warning";
    pub const TRUCK_WEAR_CABIN: &str = "truck.wear.cabin";
    pub const TRUCK_WEAR_CHASSIS: &str = "truck.wear.chassis";
    pub const TRUCK_WEAR_ENGINE: &str = "truck.wear.engine";
    pub const TRUCK_WEAR_TRANSMISSION: &str = "truck.wear.transmission";
    pub const TRUCK_WEAR_WHEELS: &str = "truck.wear.wheels";
    pub const TRUCK_WHEEL_LIFT: &str = "truck.wheel.lift";
    pub const TRUCK_WIPERS: &str = "truck.wipers";
    pub const TRUCK_WORLD_PLACEMENT: &str = "truck.world.placement";

    /// Prefix of per-trailer channels: `trailer.<n>.<leaf>`
    pub const TRAILER_PREFIX: &str = "trailer";

    // Leaves of the per-trailer channels
    pub const TRAILER_CARGO_DAMAGE: &str = "cargo.damage";
    pub const TRAILER_CONNECTED: &str = "connected";
    pub const TRAILER_WEAR_BODY: &str = "wear.body";
    pub const TRAILER_WEAR_CHASSIS: &str = "wear.chassis";
    pub const TRAILER_WEAR_WHEELS: &str = "wear.wheels";
    pub const TRAILER_WHEEL_LIFT: &str = "wheel.lift";
    pub const TRAILER_WORLD_PLACEMENT: &str = "world.placement";
}

/// Configuration event identifiers
pub mod config {
    pub const CONTROLS: &str = "controls";
    pub const HSHIFTER: &str = "hshifter";
    pub const TRUCK: &str = "truck";
    /// Legacy single-trailer configuration, superseded by `trailer.<n>`
    pub const TRAILER: &str = "trailer";
    pub const JOB: &str = "job";
}

/// Gameplay event identifiers
pub mod gameplay {
    pub const JOB_CANCELLED: &str = "job.cancelled";
    pub const JOB_DELIVERED: &str = "job.delivered";
    pub const PLAYER_FINED: &str = "player.fined";
    pub const PLAYER_TOLLGATE_PAID: &str = "player.tollgate.paid";
    pub const PLAYER_USE_FERRY: &str = "player.use.ferry";
    pub const PLAYER_USE_TRAIN: &str = "player.use.train";
}

/// Attribute names of configuration and gameplay events
pub mod attribute {
    pub const SHIFTER_TYPE: &str = "shifter.type";
    pub const SELECTOR_COUNT: &str = "selector.count";
    pub const SLOT_GEAR: &str = "slot.gear";
    pub const SLOT_HANDLE_POSITION: &str = "slot.handle.position";
    pub const SLOT_SELECTORS: &str = "slot.selectors";

    pub const ID: &str = "id";
    pub const BRAND_ID: &str = "brand_id";
    pub const BRAND: &str = "brand";
    pub const NAME: &str = "name";
    pub const FUEL_CAPACITY: &str = "fuel.capacity";
    pub const FUEL_WARNING_FACTOR: &str = "fuel.warning.factor";
    pub const ADBLUE_CAPACITY: &str = "adblue.capacity";
    pub const AIR_PRESSURE_WARNING: &str = "brake.air.pressure.warning";
    pub const AIR_PRESSURE_EMERGENCY: &str = "brake.air.pressure.emergency";
    pub const OIL_PRESSURE_WARNING: &str = "oil.pressure.warning";
    pub const WATER_TEMPERATURE_WARNING: &str = "water.temperature.warning";
    pub const BATTERY_VOLTAGE_WARNING: &str = "battery.voltage.warning";
    pub const RPM_LIMIT: &str = "rpm.limit";
    pub const FORWARD_GEAR_COUNT: &str = "gears.forward";
    pub const REVERSE_GEAR_COUNT: &str = "gears.reverse";
    pub const DIFFERENTIAL_RATIO: &str = "differential.ratio";
    pub const FORWARD_RATIO: &str = "forward.ratio";
    pub const REVERSE_RATIO: &str = "reverse.ratio";
    pub const RETARDER_STEP_COUNT: &str = "retarder.steps";
    pub const CABIN_POSITION: &str = "cabin.position";
    pub const HEAD_POSITION: &str = "head.position";
    pub const HOOK_POSITION: &str = "hook.position";
    pub const WHEEL_COUNT: &str = "wheels.count";
    pub const WHEEL_POSITION: &str = "wheel.position";
    pub const WHEEL_STEERABLE: &str = "wheel.steerable";
    pub const WHEEL_SIMULATED: &str = "wheel.simulated";
    pub const WHEEL_RADIUS: &str = "wheel.radius";
    pub const WHEEL_POWERED: &str = "wheel.powered";
    pub const WHEEL_LIFTABLE: &str = "wheel.liftable";
    pub const LICENSE_PLATE: &str = "license.plate";
    pub const LICENSE_PLATE_COUNTRY: &str = "license.plate.country";
    pub const LICENSE_PLATE_COUNTRY_ID: &str = "license.plate.country.id";

    pub const CARGO_ACCESSORY_ID: &str = "cargo.accessory.id";
    pub const BODY_TYPE: &str = "body.type";
    pub const CHAIN_TYPE: &str = "chain.type";

    pub const CARGO_ID: &str = "cargo.id";
    pub const CARGO: &str = "cargo";
    pub const CARGO_MASS: &str = "cargo.mass";
    pub const CARGO_UNIT_COUNT: &str = "cargo.unit.count";
    pub const CARGO_UNIT_MASS: &str = "cargo.unit.mass";
    pub const CARGO_LOADED: &str = "cargo.loaded";
    pub const DESTINATION_CITY: &str = "destination.city";
    pub const DESTINATION_COMPANY: &str = "destination.company";
    pub const SOURCE_CITY: &str = "source.city";
    pub const SOURCE_COMPANY: &str = "source.company";
    pub const INCOME: &str = "income";
    pub const DELIVERY_TIME: &str = "delivery.time";
    pub const JOB_MARKET: &str = "job.market";
    pub const SPECIAL_JOB: &str = "is.special.job";
    pub const PLANNED_DISTANCE_KM: &str = "planned_distance.km";

    pub const CANCEL_PENALTY: &str = "cancel.penalty";
    pub const REVENUE: &str = "revenue";
    pub const EARNED_XP: &str = "earned.xp";
    pub const CARGO_DAMAGE: &str = "cargo.damage";
    pub const DISTANCE_KM: &str = "distance.km";
    pub const AUTO_PARK_USED: &str = "auto.park.used";
    pub const AUTO_LOAD_USED: &str = "auto.load.used";
    pub const FINE_OFFENCE: &str = "fine.offence";
    pub const FINE_AMOUNT: &str = "fine.amount";
    pub const PAY_AMOUNT: &str = "pay.amount";
    pub const SOURCE_NAME: &str = "source.name";
    pub const TARGET_NAME: &str = "target.name";
    pub const SOURCE_ID: &str = "source.id";
    pub const TARGET_ID: &str = "target.id";
}

/// Values of the `shifter.type` attribute
pub mod shifter_type {
    pub const ARCADE: &str = "arcade";
    pub const AUTOMATIC: &str = "automatic";
    pub const MANUAL: &str = "manual";
    pub const HSHIFTER: &str = "hshifter";
}
