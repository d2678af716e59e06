//! The normalized telemetry document
//!
//! A concrete struct-of-structs whose serialized shape (field names, nesting,
//! indexed collections keyed by decimal strings) is the compatibility surface
//! consumed by dashboards. The dispatch engine routes generic writes through
//! the [`Section`] path accessor; readers only ever see the typed structs.

use crate::convert::{game_time_base, json_time};
use crate::types::{DocumentError, Placement, Value, Vector3};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of trailer slots the host exposes
pub const TRAILER_COUNT: usize = 10;
/// Number of wheel slots per vehicle the host exposes
pub const WHEEL_COUNT: usize = 14;
/// Version of the dashboard protocol this document mimics
pub const TELEMETRY_PLUGIN_VERSION: &str = "7";

/// Indexed collection: small non-negative index to value
pub type Indexed<T> = BTreeMap<usize, T>;

/// Conversion from a (converted) host value into a document field type
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, DocumentError>;
}

fn mismatch(expected: &'static str, value: &Value) -> DocumentError {
    DocumentError::TypeMismatch {
        expected,
        found: value.kind(),
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Bool(_) | Value::Integer(_) | Value::Float(_) => Ok(value.as_bool()),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Float(v) if !v.is_finite() => Err(DocumentError::NonFinite),
            Value::Integer(_) | Value::Float(_) | Value::Bool(_) => {
                value.as_i64().ok_or_else(|| mismatch("integer", &value))
            }
            other => Err(mismatch("integer", &other)),
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        let found = value.kind();
        let v = i64::from_value(value)?;
        u32::try_from(v).map_err(|_| DocumentError::TypeMismatch {
            expected: "unsigned integer",
            found,
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Float(v) if !v.is_finite() => Err(DocumentError::NonFinite),
            Value::Integer(_) | Value::Float(_) | Value::Bool(_) => {
                value.as_f64().ok_or_else(|| mismatch("float", &value))
            }
            other => Err(mismatch("float", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Text(s) => Ok(s),
            Value::Time(t) => Ok(json_time(t)),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl FromValue for Vector3 {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Vector(v) if v.is_finite() => Ok(v),
            Value::Vector(_) => Err(DocumentError::NonFinite),
            other => Err(mismatch("vector", &other)),
        }
    }
}

impl FromValue for Placement {
    fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Placement(p) if p.components().iter().all(|v| v.is_finite()) => Ok(p),
            Value::Placement(_) => Err(DocumentError::NonFinite),
            other => Err(mismatch("placement", &other)),
        }
    }
}

/// Path accessor implemented by every struct in the document
///
/// `set_field` writes a scalar leaf, `set_entry` writes one entry of an
/// indexed scalar table, `set_keyed` writes one sub-field of one record in an
/// indexed record collection (e.g. `wheels[3].lifted`).
pub trait Section {
    fn set_field(&mut self, field: &str, value: Value) -> Result<(), DocumentError>;

    fn set_entry(&mut self, field: &str, index: usize, value: Value) -> Result<(), DocumentError>;

    fn set_keyed(
        &mut self,
        field: &str,
        index: usize,
        key: &str,
        value: Value,
    ) -> Result<(), DocumentError>;
}

macro_rules! section {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident: $ty:ty = $default:expr => $key:literal, )*
        }
        tables {
            $( $tfield:ident: $tty:ty => $tkey:literal, )*
        }
        records {
            $( $rfield:ident: $rty:ty = $rdefault:expr => $rkey:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $name {
            $( #[serde(rename = $key)] pub $field: $ty, )*
            $( #[serde(rename = $tkey)] pub $tfield: Indexed<$tty>, )*
            $( #[serde(rename = $rkey)] pub $rfield: Indexed<$rty>, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                    $( $tfield: Indexed::new(), )*
                    $( $rfield: $rdefault, )*
                }
            }
        }

        impl Section for $name {
            fn set_field(&mut self, field: &str, value: Value) -> Result<(), DocumentError> {
                match field {
                    $( $key => self.$field = FromValue::from_value(value)?, )*
                    $( $tkey => return Err(DocumentError::MissingIndex { field: field.to_string() }), )*
                    $( $rkey => return Err(DocumentError::MissingIndex { field: field.to_string() }), )*
                    _ => return Err(DocumentError::UnknownField(field.to_string())),
                }
                Ok(())
            }

            #[allow(unused_variables)]
            fn set_entry(&mut self, field: &str, index: usize, value: Value) -> Result<(), DocumentError> {
                match field {
                    $( $tkey => {
                        self.$tfield.insert(index, FromValue::from_value(value)?);
                        Ok(())
                    } )*
                    _ => Err(DocumentError::UnknownField(field.to_string())),
                }
            }

            #[allow(unused_variables)]
            fn set_keyed(
                &mut self,
                field: &str,
                index: usize,
                key: &str,
                value: Value,
            ) -> Result<(), DocumentError> {
                match field {
                    $( $rkey => self
                        .$rfield
                        .get_mut(&index)
                        .ok_or_else(|| DocumentError::IndexOutOfRange { field: field.to_string(), index })?
                        .set_field(key, value), )*
                    _ => Err(DocumentError::UnknownField(field.to_string())),
                }
            }
        }
    };
}

fn epoch() -> String {
    json_time(game_time_base())
}

fn slots<T: Default>(count: usize) -> Indexed<T> {
    (0..count).map(|i| (i, T::default())).collect()
}

section! {
    /// Wheel of the truck or of a trailer
    pub struct Wheel {
        simulated: bool = false => "simulated",
        steerable: bool = false => "steerable",
        radius: f64 = 0.0 => "radius",
        position: Vector3 = Vector3::default() => "position",
        powered: bool = false => "powered",
        liftable: bool = false => "liftable",
        lifted: bool = false => "lifted",
    }
    tables {}
    records {}
}

section! {
    /// Connection state, game clock and version identifiers
    pub struct Game {
        connected: bool = true => "connected",
        game_name: String = String::new() => "gameName",
        paused: bool = true => "paused",
        time: String = epoch() => "time",
        time_scale: f64 = 19.0 => "timeScale",
        next_rest_stop_time: String = epoch() => "nextRestStopTime",
        version: String = "0.0".to_string() => "version",
        telemetry_plugin_version: String = TELEMETRY_PLUGIN_VERSION.to_string() => "telemetryPluginVersion",
        max_trailer_count: u32 = TRAILER_COUNT as u32 => "maxTrailerCount",
    }
    tables {}
    records {}
}

section! {
    /// Static and live truck attributes
    ///
    /// `shifterType`, `forwardGears`, `reverseGears`, `gear`, `displayedGear`
    /// and `shifterSlot` are kept for dashboards that predate the `shifter`
    /// section and mirror it.
    pub struct Truck {
        id: String = String::new() => "id",
        make: String = String::new() => "make",
        model: String = String::new() => "model",
        speed: i64 = 0 => "speed",
        cruise_control_speed: i64 = 0 => "cruiseControlSpeed",
        cruise_control_on: bool = false => "cruiseControlOn",
        odometer: f64 = 0.0 => "odometer",
        gear: i64 = 0 => "gear",
        displayed_gear: i64 = 0 => "displayedGear",
        forward_gears: u32 = 12 => "forwardGears",
        reverse_gears: u32 = 1 => "reverseGears",
        shifter_type: String = "automatic".to_string() => "shifterType",
        engine_rpm: f64 = 0.0 => "engineRpm",
        engine_rpm_max: f64 = 2500.0 => "engineRpmMax",
        fuel: f64 = 0.0 => "fuel",
        fuel_capacity: f64 = 700.0 => "fuelCapacity",
        fuel_average_consumption: f64 = 0.1 => "fuelAverageConsumption",
        fuel_warning_factor: f64 = 0.15 => "fuelWarningFactor",
        fuel_warning_on: bool = false => "fuelWarningOn",
        wear_engine: f64 = 0.0 => "wearEngine",
        wear_transmission: f64 = 0.0 => "wearTransmission",
        wear_cabin: f64 = 0.0 => "wearCabin",
        wear_chassis: f64 = 0.0 => "wearChassis",
        wear_wheels: f64 = 0.0 => "wearWheels",
        user_steer: f64 = 0.0 => "userSteer",
        user_throttle: f64 = 0.0 => "userThrottle",
        user_brake: f64 = 0.0 => "userBrake",
        user_clutch: f64 = 0.0 => "userClutch",
        game_steer: f64 = 0.0 => "gameSteer",
        game_throttle: f64 = 0.0 => "gameThrottle",
        game_brake: f64 = 0.0 => "gameBrake",
        game_clutch: f64 = 0.0 => "gameClutch",
        shifter_slot: u32 = 0 => "shifterSlot",
        engine_on: bool = false => "engineOn",
        electric_on: bool = false => "electricOn",
        wipers_on: bool = false => "wipersOn",
        retarder_brake: u32 = 0 => "retarderBrake",
        retarder_step_count: u32 = 3 => "retarderStepCount",
        park_brake_on: bool = false => "parkBrakeOn",
        motor_brake_on: bool = false => "motorBrakeOn",
        brake_temperature: f64 = 0.0 => "brakeTemperature",
        adblue: f64 = 0.0 => "adblue",
        adblue_capacity: f64 = 0.0 => "adblueCapacity",
        adblue_warning_on: bool = false => "adblueWarningOn",
        air_pressure: f64 = 0.0 => "airPressure",
        air_pressure_warning_on: bool = false => "airPressureWarningOn",
        air_pressure_warning_value: f64 = 65.0 => "airPressureWarningValue",
        air_pressure_emergency_on: bool = false => "airPressureEmergencyOn",
        air_pressure_emergency_value: f64 = 30.0 => "airPressureEmergencyValue",
        oil_temperature: f64 = 0.0 => "oilTemperature",
        oil_pressure: f64 = 0.0 => "oilPressure",
        oil_pressure_warning_on: bool = false => "oilPressureWarningOn",
        oil_pressure_warning_value: f64 = 10.0 => "oilPressureWarningValue",
        water_temperature: f64 = 0.0 => "waterTemperature",
        water_temperature_warning_on: bool = false => "waterTemperatureWarningOn",
        water_temperature_warning_value: f64 = 105.0 => "waterTemperatureWarningValue",
        battery_voltage: f64 = 24.0 => "batteryVoltage",
        battery_voltage_warning_on: bool = false => "batteryVoltageWarningOn",
        battery_voltage_warning_value: f64 = 22.0 => "batteryVoltageWarningValue",
        lights_dashboard_value: f64 = 0.0 => "lightsDashboardValue",
        lights_dashboard_on: bool = false => "lightsDashboardOn",
        blinker_left_active: bool = false => "blinkerLeftActive",
        blinker_right_active: bool = false => "blinkerRightActive",
        blinker_left_on: bool = false => "blinkerLeftOn",
        blinker_right_on: bool = false => "blinkerRightOn",
        hazard_warning_on: bool = false => "hazardWarningOn",
        lights_parking_on: bool = false => "lightsParkingOn",
        lights_beam_low_on: bool = false => "lightsBeamLowOn",
        lights_beam_high_on: bool = false => "lightsBeamHighOn",
        lights_aux_front_on: bool = false => "lightsAuxFrontOn",
        lights_aux_roof_on: bool = false => "lightsAuxRoofOn",
        lights_beacon_on: bool = false => "lightsBeaconOn",
        lights_brake_on: bool = false => "lightsBrakeOn",
        lights_reverse_on: bool = false => "lightsReverseOn",
        placement: Placement = Placement::default() => "placement",
        acceleration: Vector3 = Vector3::default() => "acceleration",
        head: Vector3 = Vector3::default() => "head",
        cabin: Vector3 = Vector3::default() => "cabin",
        hook: Vector3 = Vector3::default() => "hook",
        license_plate: String = String::new() => "licensePlate",
        license_plate_country_id: String = String::new() => "licensePlateCountryId",
        license_plate_country: String = String::new() => "licensePlateCountry",
        wheel_count: u32 = 0 => "wheelCount",
    }
    tables {}
    records {
        wheels: Wheel = slots(WHEEL_COUNT) => "wheels",
    }
}

section! {
    /// Transmission layout and the tables derived from it
    ///
    /// `_handlePositions` and `_bitMasks` are working tables filled from the
    /// H-shifter configuration; only `slotCount` is derived from them.
    pub struct Shifter {
        shifter_type: String = "automatic".to_string() => "type",
        forward_gears: u32 = 12 => "forwardGears",
        reverse_gears: u32 = 1 => "reverseGears",
        differential_ratio: f64 = 0.0 => "differentialRatio",
        tyre_circumference: f64 = 0.0 => "tyreCircumference",
        selector_count: u32 = 0 => "selectorCount",
        slot_count: u32 = 1 => "slotCount",
        gear: i64 = 0 => "gear",
        displayed_gear: i64 = 0 => "displayedGear",
        displayed_gear_name: String = "N".to_string() => "displayedGearName",
        slot: u32 = 0 => "slot",
        selector: u32 = 0 => "selector",
        best_gear: i64 = 0 => "bestGear",
        best_gear_name: String = "N".to_string() => "bestGearName",
    }
    tables {
        forward_gear_names: String => "forwardGearNames",
        reverse_gear_names: String => "reverseGearNames",
        forward_gear_ratios: f64 => "forwardGearRatios",
        reverse_gear_ratios: f64 => "reverseGearRatios",
        forward_speed_at_1500_rpm: i64 => "forwardSpeedAt1500Rpm",
        reverse_speed_at_1500_rpm: i64 => "reverseSpeedAt1500Rpm",
        forward_rpm_at_current_speed: i64 => "forwardRpmAtCurrentSpeed",
        reverse_rpm_at_current_speed: i64 => "reverseRpmAtCurrentSpeed",
        handle_positions: u32 => "_handlePositions",
        bit_masks: u32 => "_bitMasks",
    }
    records {}
}

impl Shifter {
    /// Forget the H-shifter layout of the previous truck
    pub fn clear_layout(&mut self) {
        self.handle_positions.clear();
        self.bit_masks.clear();
    }
}

section! {
    /// One trailer slot, indexed by physical coupling position
    pub struct Trailer {
        trailer_number: u32 = 0 => "trailerNumber",
        attached: bool = false => "attached",
        present: bool = false => "present",
        id: String = String::new() => "id",
        name: String = String::new() => "name",
        wear_wheels: f64 = 0.0 => "wearWheels",
        wear_chassis: f64 = 0.0 => "wearChassis",
        wear_body: f64 = 0.0 => "wearBody",
        cargo_damage: f64 = 0.0 => "cargoDamage",
        cargo_accessory_id: String = String::new() => "cargoAccessoryId",
        brand_id: String = String::new() => "brandId",
        brand: String = String::new() => "brand",
        body_type: String = String::new() => "bodyType",
        cargo: String = String::new() => "cargo",
        license_plate: String = String::new() => "licensePlate",
        license_plate_country: String = String::new() => "licensePlateCountry",
        license_plate_country_id: String = String::new() => "licensePlateCountryId",
        chain_type: String = String::new() => "chainType",
        placement: Placement = Placement::default() => "placement",
        hook: Vector3 = Vector3::default() => "hook",
        wheel_count: u32 = 0 => "wheelCount",
    }
    tables {}
    records {
        wheels: Wheel = slots(WHEEL_COUNT) => "wheels",
    }
}

impl Trailer {
    /// Empty trailer slot at coupling position `index`
    pub fn slot(index: usize) -> Self {
        Self {
            trailer_number: index as u32,
            ..Self::default()
        }
    }
}

section! {
    /// Currently active job
    pub struct Job {
        income: i64 = 0 => "income",
        deadline_time: String = epoch() => "deadlineTime",
        remaining_time: String = epoch() => "remainingTime",
        source_city: String = String::new() => "sourceCity",
        source_company: String = String::new() => "sourceCompany",
        destination_city: String = String::new() => "destinationCity",
        destination_company: String = String::new() => "destinationCompany",
        special_transport: bool = false => "specialTransport",
        job_market: String = String::new() => "jobMarket",
        planned_distance: i64 = 0 => "plannedDistance",
    }
    tables {}
    records {}
}

section! {
    /// Cargo of the active job
    pub struct Cargo {
        cargo_loaded: bool = false => "cargoLoaded",
        cargo_id: String = String::new() => "cargoId",
        cargo: String = String::new() => "cargo",
        mass: f64 = 0.0 => "mass",
        unit_mass: f64 = 0.0 => "unitMass",
        unit_count: f64 = 0.0 => "unitCount",
        damage: f64 = 0.0 => "damage",
    }
    tables {}
    records {}
}

section! {
    /// Route advisor state towards the next waypoint
    pub struct Navigation {
        estimated_time: String = epoch() => "estimatedTime",
        estimated_distance: i64 = 0 => "estimatedDistance",
        speed_limit: i64 = 0 => "speedLimit",
    }
    tables {}
    records {}
}

section! {
    pub struct FinedEvent {
        fine_offense: String = String::new() => "fineOffense",
        fine_amount: f64 = 0.0 => "fineAmount",
        fined: bool = false => "fined",
    }
    tables {}
    records {}
}

section! {
    /// Job completion payload; the `job*` booleans are edges, toggled on every occurrence
    pub struct JobEvent {
        job_finished: bool = false => "jobFinished",
        job_cancelled: bool = false => "jobCancelled",
        job_delivered: bool = false => "jobDelivered",
        cancel_penalty: f64 = 0.0 => "cancelPenalty",
        revenue: f64 = 0.0 => "revenue",
        earned_xp: f64 = 0.0 => "earnedXp",
        cargo_damage: f64 = 0.0 => "cargoDamage",
        distance: f64 = 0.0 => "distance",
        delivery_time: String = epoch() => "deliveryTime",
        autopark_used: bool = false => "autoparkUsed",
        autoload_used: bool = false => "autoloadUsed",
    }
    tables {}
    records {}
}

section! {
    pub struct TollgateEvent {
        tollgate_used: bool = false => "tollgateUsed",
        pay_amount: f64 = 0.0 => "payAmount",
    }
    tables {}
    records {}
}

section! {
    pub struct FerryEvent {
        ferry_used: bool = false => "ferryUsed",
        source_name: String = String::new() => "sourceName",
        target_name: String = String::new() => "targetName",
        source_id: String = String::new() => "sourceId",
        target_id: String = String::new() => "targetId",
        pay_amount: f64 = 0.0 => "payAmount",
    }
    tables {}
    records {}
}

section! {
    pub struct TrainEvent {
        train_used: bool = false => "trainUsed",
        source_name: String = String::new() => "sourceName",
        target_name: String = String::new() => "targetName",
        source_id: String = String::new() => "sourceId",
        target_id: String = String::new() => "targetId",
        pay_amount: f64 = 0.0 => "payAmount",
    }
    tables {}
    records {}
}

/// Top-level section of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Game,
    Truck,
    Shifter,
    Trailers,
    Job,
    Cargo,
    Navigation,
    FinedEvent,
    JobEvent,
    TollgateEvent,
    FerryEvent,
    TrainEvent,
}

impl SectionId {
    /// Key of the section in the serialized document
    pub fn name(self) -> &'static str {
        match self {
            SectionId::Game => "game",
            SectionId::Truck => "truck",
            SectionId::Shifter => "shifter",
            SectionId::Trailers => "trailers",
            SectionId::Job => "job",
            SectionId::Cargo => "cargo",
            SectionId::Navigation => "navigation",
            SectionId::FinedEvent => "finedEvent",
            SectionId::JobEvent => "jobEvent",
            SectionId::TollgateEvent => "tollgateEvent",
            SectionId::FerryEvent => "ferryEvent",
            SectionId::TrainEvent => "trainEvent",
        }
    }
}

/// Fully composed destination of one write:
/// `[section, trailer?, field, index?, key?]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePath<'a> {
    pub section: SectionId,
    pub trailer: Option<usize>,
    pub field: &'a str,
    pub index: Option<usize>,
    pub key: Option<&'a str>,
}

/// One-shot boolean flags toggled by gameplay events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlag {
    Fined,
    JobCancelled,
    JobDelivered,
    JobFinished,
    TollgateUsed,
    FerryUsed,
    TrainUsed,
}

/// The whole normalized document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub game: Game,
    pub truck: Truck,
    pub shifter: Shifter,
    pub trailer_count: u32,
    pub trailers: Indexed<Trailer>,
    /// Copy of `trailers[0]`, rebound after every trailer change
    pub trailer: Trailer,
    pub job: Job,
    pub cargo: Cargo,
    pub navigation: Navigation,
    pub fined_event: FinedEvent,
    pub job_event: JobEvent,
    pub tollgate_event: TollgateEvent,
    pub ferry_event: FerryEvent,
    pub train_event: TrainEvent,
}

impl Document {
    /// Fresh document with every field at its default
    pub fn new() -> Self {
        let trailers: Indexed<Trailer> = (0..TRAILER_COUNT).map(|i| (i, Trailer::slot(i))).collect();
        let trailer = Trailer::slot(0);

        Self {
            game: Game::default(),
            truck: Truck::default(),
            shifter: Shifter::default(),
            trailer_count: 0,
            trailers,
            trailer,
            job: Job::default(),
            cargo: Cargo::default(),
            navigation: Navigation::default(),
            fined_event: FinedEvent::default(),
            job_event: JobEvent::default(),
            tollgate_event: TollgateEvent::default(),
            ferry_event: FerryEvent::default(),
            train_event: TrainEvent::default(),
        }
    }

    fn section_mut(&mut self, section: SectionId, trailer: Option<usize>) -> Result<&mut dyn Section, DocumentError> {
        let target: &mut dyn Section = match section {
            SectionId::Game => &mut self.game,
            SectionId::Truck => &mut self.truck,
            SectionId::Shifter => &mut self.shifter,
            SectionId::Trailers => {
                let index = trailer.ok_or_else(|| DocumentError::MissingIndex {
                    field: "trailers".to_string(),
                })?;
                self.trailers
                    .get_mut(&index)
                    .ok_or_else(|| DocumentError::IndexOutOfRange {
                        field: "trailers".to_string(),
                        index,
                    })?
            }
            SectionId::Job => &mut self.job,
            SectionId::Cargo => &mut self.cargo,
            SectionId::Navigation => &mut self.navigation,
            SectionId::FinedEvent => &mut self.fined_event,
            SectionId::JobEvent => &mut self.job_event,
            SectionId::TollgateEvent => &mut self.tollgate_event,
            SectionId::FerryEvent => &mut self.ferry_event,
            SectionId::TrainEvent => &mut self.train_event,
        };
        Ok(target)
    }

    /// Write `value` at `path`
    ///
    /// Nothing is created on failure: the target must already exist.
    pub fn write(&mut self, path: &WritePath<'_>, value: Value) -> Result<(), DocumentError> {
        let section = self.section_mut(path.section, path.trailer)?;
        match (path.index, path.key) {
            (Some(index), Some(key)) => section.set_keyed(path.field, index, key, value),
            (None, Some(_)) => Err(DocumentError::MissingIndex {
                field: path.field.to_string(),
            }),
            (Some(index), None) => section.set_entry(path.field, index, value),
            (None, None) => section.set_field(path.field, value),
        }
    }

    /// Flip a one-shot event flag
    pub fn toggle(&mut self, flag: EventFlag) {
        let field = match flag {
            EventFlag::Fined => &mut self.fined_event.fined,
            EventFlag::JobCancelled => &mut self.job_event.job_cancelled,
            EventFlag::JobDelivered => &mut self.job_event.job_delivered,
            EventFlag::JobFinished => &mut self.job_event.job_finished,
            EventFlag::TollgateUsed => &mut self.tollgate_event.tollgate_used,
            EventFlag::FerryUsed => &mut self.ferry_event.ferry_used,
            EventFlag::TrainUsed => &mut self.train_event.train_used,
        };
        *field ^= true;
    }

    /// Return job and cargo to their no-job defaults
    pub fn reset_job(&mut self) {
        self.job = Job::default();
        self.cargo = Cargo::default();
    }

    /// Return one trailer slot to its empty state
    pub fn clear_trailer(&mut self, index: usize) {
        if let Some(trailer) = self.trailers.get_mut(&index) {
            *trailer = Trailer::slot(index);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
