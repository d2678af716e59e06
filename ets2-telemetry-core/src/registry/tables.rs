//! Static mapping tables
//!
//! Every entry is fully typed at compile time; [`super::Registry::standard`]
//! indexes them once at startup.

use super::ids::{attribute as a, channel as c, config, gameplay as g};
use super::{ChannelHook, FieldPath, GameplayAction, Mapping, SideEffect};
use crate::convert::Converter;
use crate::document::{EventFlag, SectionId as S, WHEEL_COUNT};

/// Number of selector bits an H-shifter can report
pub const SELECTOR_BITS: usize = 32;

const fn plain(section: S, field: &'static str) -> Mapping {
    Mapping::Plain(FieldPath::new(section, field))
}

const fn conv(section: S, field: &'static str, converter: Converter) -> Mapping {
    Mapping::Converted(FieldPath::new(section, field), converter)
}

const fn keyed(section: S, field: &'static str, key: &'static str) -> Mapping {
    Mapping::Keyed(FieldPath::new(section, field), key)
}

const fn keyed_conv(section: S, field: &'static str, key: &'static str, converter: Converter) -> Mapping {
    Mapping::KeyedConverted(FieldPath::new(section, field), key, converter)
}

const fn table(section: S, field: &'static str) -> Mapping {
    Mapping::Table(FieldPath::new(section, field))
}

pub(super) type MappingTable = &'static [(&'static str, &'static [Mapping])];

/// Vehicle-wide channels
pub(super) const CHANNELS: MappingTable = &[
    (c::GAME_TIME, &[conv(S::Game, "time", Converter::CurrentGameTime)]),
    (c::LOCAL_SCALE, &[plain(S::Game, "timeScale")]),
    (c::NEXT_REST_STOP, &[conv(S::Game, "nextRestStopTime", Converter::Minutes)]),
    (c::JOB_CARGO_DAMAGE, &[plain(S::Cargo, "damage")]),
    (c::TRUCK_ADBLUE, &[plain(S::Truck, "adblue")]),
    (c::TRUCK_ADBLUE_WARNING, &[plain(S::Truck, "adblueWarningOn")]),
    (c::TRUCK_BATTERY_VOLTAGE, &[plain(S::Truck, "batteryVoltage")]),
    (c::TRUCK_BATTERY_VOLTAGE_WARNING, &[plain(S::Truck, "batteryVoltageWarningOn")]),
    (c::TRUCK_BRAKE_AIR_PRESSURE, &[plain(S::Truck, "airPressure")]),
    (c::TRUCK_BRAKE_AIR_PRESSURE_WARNING, &[plain(S::Truck, "airPressureWarningOn")]),
    (c::TRUCK_BRAKE_AIR_PRESSURE_EMERGENCY, &[plain(S::Truck, "airPressureEmergencyOn")]),
    (c::TRUCK_BRAKE_TEMPERATURE, &[plain(S::Truck, "brakeTemperature")]),
    (c::TRUCK_CRUISE_CONTROL, &[conv(S::Truck, "cruiseControlSpeed", Converter::MpsToKph)]),
    (c::TRUCK_DASHBOARD_BACKLIGHT, &[plain(S::Truck, "lightsDashboardValue")]),
    (c::TRUCK_DISPLAYED_GEAR, &[plain(S::Truck, "displayedGear"), plain(S::Shifter, "displayedGear")]),
    (c::TRUCK_EFFECTIVE_BRAKE, &[plain(S::Truck, "gameBrake")]),
    (c::TRUCK_EFFECTIVE_CLUTCH, &[plain(S::Truck, "gameClutch")]),
    (c::TRUCK_EFFECTIVE_STEERING, &[plain(S::Truck, "gameSteer")]),
    (c::TRUCK_EFFECTIVE_THROTTLE, &[plain(S::Truck, "gameThrottle")]),
    (c::TRUCK_ELECTRIC_ENABLED, &[plain(S::Truck, "electricOn")]),
    (c::TRUCK_ENGINE_ENABLED, &[plain(S::Truck, "engineOn")]),
    (c::TRUCK_ENGINE_GEAR, &[plain(S::Truck, "gear"), plain(S::Shifter, "gear")]),
    (c::TRUCK_ENGINE_RPM, &[plain(S::Truck, "engineRpm")]),
    (c::TRUCK_FUEL, &[plain(S::Truck, "fuel")]),
    (c::TRUCK_FUEL_AVERAGE_CONSUMPTION, &[plain(S::Truck, "fuelAverageConsumption")]),
    (c::TRUCK_FUEL_WARNING, &[plain(S::Truck, "fuelWarningOn")]),
    (c::TRUCK_HAZARD_WARNING, &[plain(S::Truck, "hazardWarningOn")]),
    (c::TRUCK_HSHIFTER_SLOT, &[plain(S::Truck, "shifterSlot"), plain(S::Shifter, "slot")]),
    (c::TRUCK_INPUT_BRAKE, &[plain(S::Truck, "userBrake")]),
    (c::TRUCK_INPUT_CLUTCH, &[plain(S::Truck, "userClutch")]),
    (c::TRUCK_INPUT_STEERING, &[plain(S::Truck, "userSteer")]),
    (c::TRUCK_INPUT_THROTTLE, &[plain(S::Truck, "userThrottle")]),
    (c::TRUCK_LBLINKER, &[plain(S::Truck, "blinkerLeftOn")]),
    (c::TRUCK_RBLINKER, &[plain(S::Truck, "blinkerRightOn")]),
    (c::TRUCK_LIGHT_AUX_FRONT, &[conv(S::Truck, "lightsAuxFrontOn", Converter::NonZero)]),
    (c::TRUCK_LIGHT_AUX_ROOF, &[conv(S::Truck, "lightsAuxRoofOn", Converter::NonZero)]),
    (c::TRUCK_LIGHT_BEACON, &[plain(S::Truck, "lightsBeaconOn")]),
    (c::TRUCK_LIGHT_BRAKE, &[plain(S::Truck, "lightsBrakeOn")]),
    (c::TRUCK_LIGHT_HIGH_BEAM, &[plain(S::Truck, "lightsBeamHighOn")]),
    (c::TRUCK_LIGHT_LOW_BEAM, &[plain(S::Truck, "lightsBeamLowOn")]),
    (c::TRUCK_LIGHT_LBLINKER, &[plain(S::Truck, "blinkerLeftActive")]),
    (c::TRUCK_LIGHT_RBLINKER, &[plain(S::Truck, "blinkerRightActive")]),
    (c::TRUCK_LIGHT_PARKING, &[plain(S::Truck, "lightsParkingOn")]),
    (c::TRUCK_LIGHT_REVERSE, &[plain(S::Truck, "lightsReverseOn")]),
    (c::TRUCK_LOCAL_LINEAR_ACCELERATION, &[plain(S::Truck, "acceleration")]),
    (c::TRUCK_MOTOR_BRAKE, &[plain(S::Truck, "motorBrakeOn")]),
    (c::TRUCK_NAVIGATION_DISTANCE, &[conv(S::Navigation, "estimatedDistance", Converter::Round)]),
    (c::TRUCK_NAVIGATION_SPEED_LIMIT, &[conv(S::Navigation, "speedLimit", Converter::MpsToKph)]),
    (c::TRUCK_NAVIGATION_TIME, &[conv(S::Navigation, "estimatedTime", Converter::Seconds)]),
    (c::TRUCK_ODOMETER, &[plain(S::Truck, "odometer")]),
    (c::TRUCK_OIL_PRESSURE, &[plain(S::Truck, "oilPressure")]),
    (c::TRUCK_OIL_PRESSURE_WARNING, &[plain(S::Truck, "oilPressureWarningOn")]),
    (c::TRUCK_OIL_TEMPERATURE, &[plain(S::Truck, "oilTemperature")]),
    (c::TRUCK_PARKING_BRAKE, &[plain(S::Truck, "parkBrakeOn")]),
    (c::TRUCK_RETARDER_LEVEL, &[plain(S::Truck, "retarderBrake")]),
    (c::TRUCK_SPEED, &[conv(S::Truck, "speed", Converter::MpsToKph)]),
    (c::TRUCK_WATER_TEMPERATURE, &[plain(S::Truck, "waterTemperature")]),
    (c::TRUCK_WATER_TEMPERATURE_WARNING, &[plain(S::Truck, "waterTemperatureWarningOn")]),
    (c::TRUCK_WEAR_CABIN, &[plain(S::Truck, "wearCabin")]),
    (c::TRUCK_WEAR_CHASSIS, &[plain(S::Truck, "wearChassis")]),
    (c::TRUCK_WEAR_ENGINE, &[plain(S::Truck, "wearEngine")]),
    (c::TRUCK_WEAR_TRANSMISSION, &[plain(S::Truck, "wearTransmission")]),
    (c::TRUCK_WEAR_WHEELS, &[plain(S::Truck, "wearWheels")]),
    (c::TRUCK_WHEEL_LIFT, &[keyed_conv(S::Truck, "wheels", "lifted", Converter::Lifted)]),
    (c::TRUCK_WIPERS, &[plain(S::Truck, "wipersOn")]),
    (c::TRUCK_WORLD_PLACEMENT, &[conv(S::Truck, "placement", Converter::FlattenPlacement)]),
];

/// Leaves of `trailer.<n>.<leaf>`; expanded once per trailer slot
pub(super) const TRAILER_CHANNELS: MappingTable = &[
    (c::TRAILER_CARGO_DAMAGE, &[plain(S::Trailers, "cargoDamage")]),
    (c::TRAILER_CONNECTED, &[plain(S::Trailers, "attached")]),
    (c::TRAILER_WEAR_BODY, &[plain(S::Trailers, "wearBody")]),
    (c::TRAILER_WEAR_CHASSIS, &[plain(S::Trailers, "wearChassis")]),
    (c::TRAILER_WEAR_WHEELS, &[plain(S::Trailers, "wearWheels")]),
    (c::TRAILER_WHEEL_LIFT, &[keyed_conv(S::Trailers, "wheels", "lifted", Converter::Lifted)]),
    (c::TRAILER_WORLD_PLACEMENT, &[conv(S::Trailers, "placement", Converter::FlattenPlacement)]),
];

/// Side effects run before the registry mapping of a channel
pub(super) const CHANNEL_HOOKS: &[(&str, ChannelHook)] = &[
    (c::GAME_TIME, ChannelHook::GameTime),
    (c::TRUCK_DASHBOARD_BACKLIGHT, ChannelHook::DashboardBacklight),
    (c::TRUCK_CRUISE_CONTROL, ChannelHook::CruiseControl),
    (c::TRUCK_SPEED, ChannelHook::Speed),
    (c::TRUCK_DISPLAYED_GEAR, ChannelHook::DisplayedGear),
    (c::TRUCK_HSHIFTER_SELECTOR, ChannelHook::HShifterSelector),
];

/// Channels the host delivers once per index
pub(super) const INDEXED_CHANNELS: &[(&str, usize)] = &[
    (c::TRUCK_WHEEL_LIFT, WHEEL_COUNT),
    (c::TRUCK_HSHIFTER_SELECTOR, SELECTOR_BITS),
    (c::TRAILER_WHEEL_LIFT, WHEEL_COUNT),
];

pub(super) const CONTROLS_ATTRIBUTES: MappingTable = &[(
    a::SHIFTER_TYPE,
    &[plain(S::Shifter, "type"), plain(S::Truck, "shifterType")],
)];

pub(super) const HSHIFTER_ATTRIBUTES: MappingTable = &[
    (a::SELECTOR_COUNT, &[plain(S::Shifter, "selectorCount")]),
    (a::SLOT_HANDLE_POSITION, &[table(S::Shifter, "_handlePositions")]),
    (a::SLOT_SELECTORS, &[table(S::Shifter, "_bitMasks")]),
];

pub(super) const TRUCK_ATTRIBUTES: MappingTable = &[
    (a::BRAND_ID, &[plain(S::Truck, "id")]),
    (a::BRAND, &[plain(S::Truck, "make")]),
    (a::NAME, &[plain(S::Truck, "model")]),
    (a::FUEL_CAPACITY, &[plain(S::Truck, "fuelCapacity")]),
    (a::FUEL_WARNING_FACTOR, &[plain(S::Truck, "fuelWarningFactor")]),
    (a::ADBLUE_CAPACITY, &[plain(S::Truck, "adblueCapacity")]),
    (a::AIR_PRESSURE_WARNING, &[plain(S::Truck, "airPressureWarningValue")]),
    (a::AIR_PRESSURE_EMERGENCY, &[plain(S::Truck, "airPressureEmergencyValue")]),
    (a::OIL_PRESSURE_WARNING, &[plain(S::Truck, "oilPressureWarningValue")]),
    (a::WATER_TEMPERATURE_WARNING, &[plain(S::Truck, "waterTemperatureWarningValue")]),
    (a::BATTERY_VOLTAGE_WARNING, &[plain(S::Truck, "batteryVoltageWarningValue")]),
    (a::RPM_LIMIT, &[plain(S::Truck, "engineRpmMax")]),
    (a::FORWARD_GEAR_COUNT, &[plain(S::Shifter, "forwardGears"), plain(S::Truck, "forwardGears")]),
    (a::REVERSE_GEAR_COUNT, &[plain(S::Shifter, "reverseGears"), plain(S::Truck, "reverseGears")]),
    (a::DIFFERENTIAL_RATIO, &[plain(S::Shifter, "differentialRatio")]),
    (a::FORWARD_RATIO, &[table(S::Shifter, "forwardGearRatios")]),
    (a::REVERSE_RATIO, &[table(S::Shifter, "reverseGearRatios")]),
    (a::RETARDER_STEP_COUNT, &[plain(S::Truck, "retarderStepCount")]),
    (a::CABIN_POSITION, &[plain(S::Truck, "cabin")]),
    (a::HEAD_POSITION, &[plain(S::Truck, "head")]),
    (a::HOOK_POSITION, &[plain(S::Truck, "hook")]),
    (a::WHEEL_COUNT, &[plain(S::Truck, "wheelCount")]),
    (a::WHEEL_POSITION, &[keyed(S::Truck, "wheels", "position")]),
    (a::WHEEL_STEERABLE, &[keyed(S::Truck, "wheels", "steerable")]),
    (a::WHEEL_SIMULATED, &[keyed(S::Truck, "wheels", "simulated")]),
    (a::WHEEL_RADIUS, &[keyed(S::Truck, "wheels", "radius")]),
    (a::WHEEL_POWERED, &[keyed(S::Truck, "wheels", "powered")]),
    (a::WHEEL_LIFTABLE, &[keyed(S::Truck, "wheels", "liftable")]),
    (a::LICENSE_PLATE, &[plain(S::Truck, "licensePlate")]),
    (a::LICENSE_PLATE_COUNTRY, &[plain(S::Truck, "licensePlateCountry")]),
    (a::LICENSE_PLATE_COUNTRY_ID, &[plain(S::Truck, "licensePlateCountryId")]),
];

/// Shared by every `trailer.<n>` configuration event
pub(super) const TRAILER_ATTRIBUTES: MappingTable = &[
    (a::ID, &[plain(S::Trailers, "id")]),
    (a::CARGO_ACCESSORY_ID, &[plain(S::Trailers, "cargoAccessoryId")]),
    (a::HOOK_POSITION, &[plain(S::Trailers, "hook")]),
    (a::WHEEL_COUNT, &[plain(S::Trailers, "wheelCount")]),
    (a::WHEEL_POSITION, &[keyed(S::Trailers, "wheels", "position")]),
    (a::WHEEL_STEERABLE, &[keyed(S::Trailers, "wheels", "steerable")]),
    (a::WHEEL_SIMULATED, &[keyed(S::Trailers, "wheels", "simulated")]),
    (a::WHEEL_RADIUS, &[keyed(S::Trailers, "wheels", "radius")]),
    (a::WHEEL_POWERED, &[keyed(S::Trailers, "wheels", "powered")]),
    (a::WHEEL_LIFTABLE, &[keyed(S::Trailers, "wheels", "liftable")]),
    (a::BODY_TYPE, &[plain(S::Trailers, "bodyType")]),
    (a::BRAND_ID, &[plain(S::Trailers, "brandId")]),
    (a::BRAND, &[plain(S::Trailers, "brand")]),
    (a::NAME, &[plain(S::Trailers, "name")]),
    (a::CHAIN_TYPE, &[plain(S::Trailers, "chainType")]),
    (a::LICENSE_PLATE, &[plain(S::Trailers, "licensePlate")]),
    (a::LICENSE_PLATE_COUNTRY, &[plain(S::Trailers, "licensePlateCountry")]),
    (a::LICENSE_PLATE_COUNTRY_ID, &[plain(S::Trailers, "licensePlateCountryId")]),
];

pub(super) const JOB_ATTRIBUTES: MappingTable = &[
    (a::CARGO_ID, &[plain(S::Cargo, "cargoId")]),
    (a::CARGO, &[plain(S::Cargo, "cargo")]),
    (a::CARGO_MASS, &[plain(S::Cargo, "mass")]),
    (a::CARGO_UNIT_COUNT, &[plain(S::Cargo, "unitCount")]),
    (a::CARGO_UNIT_MASS, &[plain(S::Cargo, "unitMass")]),
    (a::CARGO_LOADED, &[plain(S::Cargo, "cargoLoaded")]),
    (a::DESTINATION_CITY, &[plain(S::Job, "destinationCity")]),
    (a::DESTINATION_COMPANY, &[plain(S::Job, "destinationCompany")]),
    (a::SOURCE_CITY, &[plain(S::Job, "sourceCity")]),
    (a::SOURCE_COMPANY, &[plain(S::Job, "sourceCompany")]),
    (a::INCOME, &[plain(S::Job, "income")]),
    (a::DELIVERY_TIME, &[conv(S::Job, "deadlineTime", Converter::Minutes)]),
    (a::JOB_MARKET, &[plain(S::Job, "jobMarket")]),
    (a::SPECIAL_JOB, &[plain(S::Job, "specialTransport")]),
    (a::PLANNED_DISTANCE_KM, &[plain(S::Job, "plannedDistance")]),
];

pub(super) const JOB_CANCELLED_ATTRIBUTES: MappingTable =
    &[(a::CANCEL_PENALTY, &[plain(S::JobEvent, "cancelPenalty")])];

pub(super) const JOB_DELIVERED_ATTRIBUTES: MappingTable = &[
    (a::REVENUE, &[plain(S::JobEvent, "revenue")]),
    (a::EARNED_XP, &[plain(S::JobEvent, "earnedXp")]),
    (a::CARGO_DAMAGE, &[plain(S::JobEvent, "cargoDamage")]),
    (a::DISTANCE_KM, &[plain(S::JobEvent, "distance")]),
    (a::DELIVERY_TIME, &[conv(S::JobEvent, "deliveryTime", Converter::Minutes)]),
    (a::AUTO_PARK_USED, &[plain(S::JobEvent, "autoparkUsed")]),
    (a::AUTO_LOAD_USED, &[plain(S::JobEvent, "autoloadUsed")]),
];

pub(super) const FINED_ATTRIBUTES: MappingTable = &[
    (a::FINE_OFFENCE, &[plain(S::FinedEvent, "fineOffense")]),
    (a::FINE_AMOUNT, &[plain(S::FinedEvent, "fineAmount")]),
];

pub(super) const TOLLGATE_ATTRIBUTES: MappingTable = &[(a::PAY_AMOUNT, &[plain(S::TollgateEvent, "payAmount")])];

pub(super) const FERRY_ATTRIBUTES: MappingTable = &[
    (a::PAY_AMOUNT, &[plain(S::FerryEvent, "payAmount")]),
    (a::SOURCE_NAME, &[plain(S::FerryEvent, "sourceName")]),
    (a::TARGET_NAME, &[plain(S::FerryEvent, "targetName")]),
    (a::SOURCE_ID, &[plain(S::FerryEvent, "sourceId")]),
    (a::TARGET_ID, &[plain(S::FerryEvent, "targetId")]),
];

pub(super) const TRAIN_ATTRIBUTES: MappingTable = &[
    (a::PAY_AMOUNT, &[plain(S::TrainEvent, "payAmount")]),
    (a::SOURCE_NAME, &[plain(S::TrainEvent, "sourceName")]),
    (a::TARGET_NAME, &[plain(S::TrainEvent, "targetName")]),
    (a::SOURCE_ID, &[plain(S::TrainEvent, "sourceId")]),
    (a::TARGET_ID, &[plain(S::TrainEvent, "targetId")]),
];

/// Event identifiers that resolve to an attribute table (trailers excluded)
pub(super) const EVENT_TABLES: &[(&str, MappingTable)] = &[
    (config::CONTROLS, CONTROLS_ATTRIBUTES),
    (config::HSHIFTER, HSHIFTER_ATTRIBUTES),
    (config::TRUCK, TRUCK_ATTRIBUTES),
    (config::JOB, JOB_ATTRIBUTES),
    (g::JOB_CANCELLED, JOB_CANCELLED_ATTRIBUTES),
    (g::JOB_DELIVERED, JOB_DELIVERED_ATTRIBUTES),
    (g::PLAYER_FINED, FINED_ATTRIBUTES),
    (g::PLAYER_TOLLGATE_PAID, TOLLGATE_ATTRIBUTES),
    (g::PLAYER_USE_FERRY, FERRY_ATTRIBUTES),
    (g::PLAYER_USE_TRAIN, TRAIN_ATTRIBUTES),
];

pub(super) const GAMEPLAY_EVENTS: &[(&str, GameplayAction)] = &[
    (
        g::JOB_CANCELLED,
        GameplayAction {
            flag: EventFlag::JobCancelled,
            finishes_job: true,
            side_effect: Some(SideEffect::ResetJob),
        },
    ),
    (
        g::JOB_DELIVERED,
        GameplayAction {
            flag: EventFlag::JobDelivered,
            finishes_job: true,
            side_effect: Some(SideEffect::ResetJob),
        },
    ),
    (g::PLAYER_FINED, GameplayAction::flag_only(EventFlag::Fined)),
    (g::PLAYER_TOLLGATE_PAID, GameplayAction::flag_only(EventFlag::TollgateUsed)),
    (g::PLAYER_USE_FERRY, GameplayAction::flag_only(EventFlag::FerryUsed)),
    (g::PLAYER_USE_TRAIN, GameplayAction::flag_only(EventFlag::TrainUsed)),
];
