//! Mapping registry
//!
//! Translates raw host identifiers into typed document destinations. Every
//! entry is a tagged [`Mapping`] resolved when the registry is built, so the
//! dispatch engine never inspects the shape of an entry at update time.
//! Per-trailer children (`trailer.<n>.<leaf>`) are expanded up front and carry
//! their trailer index, which replaces parsing the identifier on every update.

pub mod ids;
mod tables;

pub use tables::SELECTOR_BITS;

use crate::convert::Converter;
use crate::document::{EventFlag, SectionId, TRAILER_COUNT};
use std::collections::HashMap;
use tables::MappingTable;

/// `(section, field)` part of a destination path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub section: SectionId,
    pub field: &'static str,
}

impl FieldPath {
    pub const fn new(section: SectionId, field: &'static str) -> Self {
        Self { section, field }
    }
}

/// How one raw value reaches the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// Write the raw value as is
    Plain(FieldPath),
    /// Convert, then write
    Converted(FieldPath, Converter),
    /// Write sub-field `key` of record `[rawIndex]` (e.g. `wheels[3].lifted`)
    Keyed(FieldPath, &'static str),
    /// Convert, then write sub-field `key` of record `[rawIndex]`
    KeyedConverted(FieldPath, &'static str, Converter),
    /// Write entry `[rawIndex]` of an indexed scalar table
    Table(FieldPath),
}

impl Mapping {
    pub fn path(&self) -> FieldPath {
        match *self {
            Mapping::Plain(path)
            | Mapping::Converted(path, _)
            | Mapping::Keyed(path, _)
            | Mapping::KeyedConverted(path, _, _)
            | Mapping::Table(path) => path,
        }
    }

    pub fn key(&self) -> Option<&'static str> {
        match *self {
            Mapping::Keyed(_, key) | Mapping::KeyedConverted(_, key, _) => Some(key),
            _ => None,
        }
    }

    pub fn converter(&self) -> Option<Converter> {
        match *self {
            Mapping::Converted(_, converter) | Mapping::KeyedConverted(_, _, converter) => Some(converter),
            _ => None,
        }
    }

    /// Whether the raw index is part of the destination path
    pub fn uses_index(&self) -> bool {
        matches!(
            self,
            Mapping::Keyed(..) | Mapping::KeyedConverted(..) | Mapping::Table(_)
        )
    }
}

/// Hard-coded side effect of a channel, applied before its mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelHook {
    /// Cache the game clock and refresh the remaining job time
    GameTime,
    /// `lightsDashboardOn` shadow
    DashboardBacklight,
    /// `cruiseControlOn` shadow
    CruiseControl,
    /// Cache the raw speed for the shifter tables
    Speed,
    /// Resolve `displayedGearName`
    DisplayedGear,
    /// Set or clear one bit of `shifter.selector`
    HShifterSelector,
}

/// Everything the dispatch engine needs to know about one channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelRoute {
    pub mappings: &'static [Mapping],
    /// Trailer slot of a `trailer.<n>.<leaf>` child
    pub trailer: Option<usize>,
    pub hook: Option<ChannelHook>,
    /// Number of indices the host delivers, for indexed channels
    pub index_count: Option<usize>,
}

/// Derived values to refresh after a configuration batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recompute {
    pub gear_names: bool,
    pub tyre_circumference: bool,
    pub slot_count: bool,
}

impl Recompute {
    /// Derived values depending on the destination of `mapping`
    pub fn for_mapping(mapping: &Mapping) -> Self {
        let path = mapping.path();
        let mut recompute = Self::default();
        match (path.section, path.field) {
            (SectionId::Shifter, "type") => {
                recompute.gear_names = true;
                recompute.slot_count = true;
            }
            (SectionId::Shifter, "forwardGears" | "reverseGears") => recompute.gear_names = true,
            (SectionId::Shifter, "_handlePositions") => recompute.slot_count = true,
            (SectionId::Truck, "wheelCount") => recompute.tyre_circumference = true,
            (SectionId::Truck, "wheels") => {
                recompute.tyre_circumference = matches!(mapping.key(), Some("radius" | "powered"))
            }
            _ => {}
        }
        recompute
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            gear_names: self.gear_names || other.gear_names,
            tyre_circumference: self.tyre_circumference || other.tyre_circumference,
            slot_count: self.slot_count || other.slot_count,
        }
    }
}

/// Mappings of one event attribute plus what they invalidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRoute {
    pub mappings: &'static [Mapping],
    pub recompute: Recompute,
}

/// What a configuration or gameplay event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Controls,
    HShifter,
    Truck,
    Trailer,
    Job,
    Gameplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRoute {
    pub target: EventTarget,
    /// Trailer slot of a `trailer.<n>` event
    pub trailer: Option<usize>,
    table: usize,
}

/// Named side effect of a gameplay event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Return job and cargo to their defaults
    ResetJob,
}

/// Flag toggled by a one-shot gameplay event, plus its consequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameplayAction {
    pub flag: EventFlag,
    /// The event ends the active job
    pub finishes_job: bool,
    pub side_effect: Option<SideEffect>,
}

impl GameplayAction {
    pub const fn flag_only(flag: EventFlag) -> Self {
        Self {
            flag,
            finishes_job: false,
            side_effect: None,
        }
    }
}

/// A channel the host adapter must subscribe to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRegistration {
    pub name: String,
    /// `Some(n)`: subscribe once per index `0..n`
    pub index_count: Option<usize>,
}

type AttributeTable = HashMap<&'static str, AttributeRoute>;

/// Immutable lookup tables, built once and shared read-only
#[derive(Debug, Clone)]
pub struct Registry {
    channels: HashMap<String, ChannelRoute>,
    events: HashMap<String, EventRoute>,
    tables: Vec<AttributeTable>,
    gameplay: HashMap<&'static str, GameplayAction>,
}

fn index_table(table: MappingTable) -> AttributeTable {
    table
        .iter()
        .map(|&(name, mappings)| {
            let recompute = mappings
                .iter()
                .map(Recompute::for_mapping)
                .fold(Recompute::default(), Recompute::union);
            (name, AttributeRoute { mappings, recompute })
        })
        .collect()
}

fn index_count(id: &str) -> Option<usize> {
    tables::INDEXED_CHANNELS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, count)| *count)
}

fn event_target(id: &str) -> EventTarget {
    match id {
        ids::config::CONTROLS => EventTarget::Controls,
        ids::config::HSHIFTER => EventTarget::HShifter,
        ids::config::TRUCK => EventTarget::Truck,
        ids::config::JOB => EventTarget::Job,
        _ => EventTarget::Gameplay,
    }
}

impl Registry {
    /// Registry of every channel and event the document understands
    pub fn standard() -> Self {
        let mut channels: HashMap<String, ChannelRoute> = HashMap::new();

        for &(id, mappings) in tables::CHANNELS {
            channels.insert(
                id.to_string(),
                ChannelRoute {
                    mappings,
                    index_count: index_count(id),
                    ..ChannelRoute::default()
                },
            );
        }

        for trailer in 0..TRAILER_COUNT {
            for &(leaf, mappings) in tables::TRAILER_CHANNELS {
                let name = format!("{}.{}.{}", ids::channel::TRAILER_PREFIX, trailer, leaf);
                channels.insert(
                    name,
                    ChannelRoute {
                        mappings,
                        trailer: Some(trailer),
                        hook: None,
                        index_count: index_count(leaf),
                    },
                );
            }
        }

        for &(id, hook) in tables::CHANNEL_HOOKS {
            let route = channels.entry(id.to_string()).or_insert_with(|| ChannelRoute {
                index_count: index_count(id),
                ..ChannelRoute::default()
            });
            route.hook = Some(hook);
        }

        let mut tables_vec: Vec<AttributeTable> = Vec::new();
        let mut events = HashMap::new();

        for &(id, table) in tables::EVENT_TABLES {
            events.insert(
                id.to_string(),
                EventRoute {
                    target: event_target(id),
                    trailer: None,
                    table: tables_vec.len(),
                },
            );
            tables_vec.push(index_table(table));
        }

        let trailer_table = tables_vec.len();
        tables_vec.push(index_table(tables::TRAILER_ATTRIBUTES));
        for trailer in 0..TRAILER_COUNT {
            events.insert(
                format!("{}.{}", ids::config::TRAILER, trailer),
                EventRoute {
                    target: EventTarget::Trailer,
                    trailer: Some(trailer),
                    table: trailer_table,
                },
            );
        }

        let gameplay = tables::GAMEPLAY_EVENTS.iter().copied().collect();

        log::debug!(
            "Registry built: {} channels, {} events",
            channels.len(),
            events.len()
        );

        Self {
            channels,
            events,
            tables: tables_vec,
            gameplay,
        }
    }

    pub fn channel(&self, id: &str) -> Option<&ChannelRoute> {
        self.channels.get(id)
    }

    pub fn event(&self, id: &str) -> Option<&EventRoute> {
        self.events.get(id)
    }

    /// Attribute entry of an event; `None` for unmapped attributes
    pub fn attribute(&self, route: &EventRoute, name: &str) -> Option<&AttributeRoute> {
        self.tables.get(route.table).and_then(|table| table.get(name))
    }

    pub fn gameplay(&self, id: &str) -> Option<&GameplayAction> {
        self.gameplay.get(id)
    }

    /// Legacy identifiers that must be dropped without processing
    pub fn is_ignored_event(&self, id: &str) -> bool {
        id == ids::config::TRAILER
    }

    /// Every channel subscription, sorted by name
    pub fn channel_registrations(&self) -> Vec<ChannelRegistration> {
        let mut registrations: Vec<ChannelRegistration> = self
            .channels
            .iter()
            .map(|(name, route)| ChannelRegistration {
                name: name.clone(),
                index_count: route.index_count,
            })
            .collect();
        registrations.sort_by(|a, b| a.name.cmp(&b.name));
        registrations
    }

    /// Every configuration and gameplay event identifier, sorted
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.events.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
