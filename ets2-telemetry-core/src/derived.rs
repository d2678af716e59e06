//! Derived values
//!
//! Cross-field computations that keep the document consistent while raw
//! inputs arrive in any order. Each function reads and writes a
//! [`Document`] the caller already holds exclusively.

use crate::config::{GameVariant, GearTarget};
use crate::document::{Document, Indexed, Shifter, Truck};
use crate::registry::ids::shifter_type;
use std::f64::consts::PI;

const NEUTRAL: &str = "N";

/// Trailer aggregation: `trailerCount` and the `trailer` alias of slot 0
pub fn recount_trailers(doc: &mut Document) {
    doc.trailer_count = doc.trailers.values().filter(|t| t.present).count() as u32;
    if let Some(first) = doc.trailers.get(&0) {
        doc.trailer = first.clone();
    }
}

fn named_table(forward_gears: u32, variant: GameVariant) -> Option<&'static [&'static str]> {
    let names: &'static [&'static str] = match (forward_gears, variant) {
        (18, _) => &[
            "N", "LL", "LH", "1L", "1H", "2L", "2H", "3L", "3H", "4L", "4H", "5L", "5H", "6L", "6H", "7L",
            "7H", "8L", "8H",
        ],
        (16, _) => &[
            "N", "1L", "1H", "2L", "2H", "3L", "3H", "4L", "4H", "5L", "5H", "6L", "6H", "7L", "7H", "8L",
            "8H",
        ],
        (14, GameVariant::Ets2) => &[
            "N", "C1", "C2", "1L", "1H", "2L", "2H", "3L", "3H", "4L", "4H", "5L", "5H", "6L", "6H",
        ],
        (14, GameVariant::Ats) => &[
            "N", "LL", "LH", "1", "2", "3", "4", "5L", "5H", "6L", "6H", "7L", "7H", "8L", "8H",
        ],
        (13, _) => &[
            "N", "L", "1", "2", "3", "4", "5L", "5H", "6L", "6H", "7L", "7H", "8L", "8H",
        ],
        (12, GameVariant::Ets2) => &[
            "N", "1L", "1H", "2L", "2H", "3L", "3H", "4L", "4H", "5L", "5H", "6L", "6H",
        ],
        (12, GameVariant::Ats) => &[
            "N", "1", "2", "3", "4", "5L", "5H", "6L", "6H", "7L", "7H", "8L", "8H",
        ],
        _ => return None,
    };
    Some(names)
}

fn named_reverse_table(reverse_gears: u32) -> Option<&'static [&'static str]> {
    let names: &'static [&'static str] = match reverse_gears {
        4 => &["N", "R1L", "R1H", "R2L", "R2H"],
        3 => &["N", "RC", "RL", "RH"],
        2 => &["N", "RL", "RH"],
        _ => return None,
    };
    Some(names)
}

fn sequential(count: u32, prefix: &str) -> Indexed<String> {
    std::iter::once(NEUTRAL.to_string())
        .chain((1..=count).map(|gear| format!("{}{}", prefix, gear)))
        .enumerate()
        .collect()
}

fn from_names(names: &[&str]) -> Indexed<String> {
    names.iter().map(|name| name.to_string()).enumerate().collect()
}

/// Forward and reverse gear-name tables for a transmission layout
///
/// Index 0 is always neutral. Layouts without a known H-shifter pattern
/// get sequential names (`1`, `2`, ... and `R1`, `R2`, ...).
pub fn gear_names(
    shifter: &str,
    forward_gears: u32,
    reverse_gears: u32,
    variant: GameVariant,
) -> (Indexed<String>, Indexed<String>) {
    let hshifter = shifter == shifter_type::HSHIFTER;

    let forward = match named_table(forward_gears, variant).filter(|_| hshifter) {
        Some(names) => from_names(names),
        None => sequential(forward_gears, ""),
    };
    let reverse = match named_reverse_table(reverse_gears).filter(|_| hshifter) {
        Some(names) => from_names(names),
        None => sequential(reverse_gears, "R"),
    };

    (forward, reverse)
}

pub fn refresh_gear_names(doc: &mut Document, variant: GameVariant) {
    let shifter = &mut doc.shifter;
    let (forward, reverse) = gear_names(
        &shifter.shifter_type,
        shifter.forward_gears,
        shifter.reverse_gears,
        variant,
    );
    shifter.forward_gear_names = forward;
    shifter.reverse_gear_names = reverse;

    let gear = shifter.displayed_gear;
    shifter.displayed_gear_name = displayed_gear_name(shifter, gear);
}

/// Name of a signed gear index (negative means reverse)
pub fn displayed_gear_name(shifter: &Shifter, gear: i64) -> String {
    if gear == 0 {
        return NEUTRAL.to_string();
    }

    let table = if gear > 0 {
        &shifter.forward_gear_names
    } else {
        &shifter.reverse_gear_names
    };
    if table.len() <= 1 {
        return NEUTRAL.to_string();
    }

    table
        .get(&(gear.unsigned_abs() as usize))
        .cloned()
        .unwrap_or_else(|| NEUTRAL.to_string())
}

/// Circumference of a representative driven wheel, 0 when unknown
pub fn tyre_circumference(truck: &Truck) -> f64 {
    let count = truck.wheel_count as usize;
    if count <= 2 {
        return 0.0;
    }

    let powered_rear = count > 4 && truck.wheels.get(&4).map_or(false, |wheel| wheel.powered);
    let index = if powered_rear { 4 } else { 2 };

    truck
        .wheels
        .get(&index)
        .map_or(0.0, |wheel| wheel.radius * 2.0 * PI)
}

/// Number of H-shifter slots; 1 for any other transmission
pub fn slot_count(shifter: &Shifter) -> u32 {
    if shifter.shifter_type != shifter_type::HSHIFTER {
        return 1;
    }
    shifter
        .handle_positions
        .keys()
        .next_back()
        .map_or(1, |max| *max as u32 + 1)
}

pub fn refresh_tyre_circumference(doc: &mut Document) {
    doc.shifter.tyre_circumference = tyre_circumference(&doc.truck);
}

pub fn refresh_slot_count(doc: &mut Document) {
    doc.shifter.slot_count = slot_count(&doc.shifter);
}

/// Gear whose RPM lies closest to the target, within the tolerance
///
/// Entry 0 (neutral) never qualifies. Ties keep the lower gear.
pub fn best_gear(rpm_table: &Indexed<i64>, target: &GearTarget) -> Option<usize> {
    let mut tolerance = target.tolerance;
    let mut best = None;

    for (&gear, &rpm) in rpm_table.iter().filter(|(gear, _)| **gear > 0) {
        let distance = (rpm as f64 - target.rpm).abs();
        if distance < tolerance {
            tolerance = distance;
            best = Some(gear);
        }
    }

    best
}

fn zeroed() -> Indexed<i64> {
    Indexed::from([(0, 0)])
}

fn has_prerequisites(shifter: &Shifter) -> bool {
    !shifter.forward_gear_ratios.is_empty()
        && !shifter.reverse_gear_ratios.is_empty()
        && shifter.forward_gears > 0
        && shifter.reverse_gears > 0
        && shifter.tyre_circumference > 0.0
        && shifter.differential_ratio > 0.0
}

/// Speed at 1500 RPM and RPM at `speed` (m/s) for every gear that has a ratio
fn speed_tables(
    ratios: &Indexed<f64>,
    gears: u32,
    differential: f64,
    circumference: f64,
    speed: f64,
) -> (Indexed<i64>, Indexed<i64>) {
    let mut speeds = zeroed();
    let mut rpms = zeroed();

    for gear in 1..=gears as usize {
        let Some(&ratio) = ratios.get(&(gear - 1)) else {
            continue;
        };
        if ratio == 0.0 {
            continue;
        }
        speeds.insert(gear, (90.0 * circumference / (differential * ratio)).round() as i64);
        rpms.insert(
            gear,
            (60.0 * speed.abs() * differential * ratio.abs() / circumference).round() as i64,
        );
    }

    (speeds, rpms)
}

/// Shifter speed/RPM tables and the best-gear estimate
pub fn refresh_shifter_tables(doc: &mut Document, last_speed: f64, target: &GearTarget) {
    let shifter = &mut doc.shifter;

    if !has_prerequisites(shifter) {
        shifter.forward_speed_at_1500_rpm = zeroed();
        shifter.reverse_speed_at_1500_rpm = zeroed();
        shifter.forward_rpm_at_current_speed = zeroed();
        shifter.reverse_rpm_at_current_speed = zeroed();
        shifter.best_gear = 0;
        shifter.best_gear_name = NEUTRAL.to_string();
        return;
    }

    let (forward_speeds, forward_rpms) = speed_tables(
        &shifter.forward_gear_ratios,
        shifter.forward_gears,
        shifter.differential_ratio,
        shifter.tyre_circumference,
        last_speed,
    );
    let (reverse_speeds, reverse_rpms) = speed_tables(
        &shifter.reverse_gear_ratios,
        shifter.reverse_gears,
        shifter.differential_ratio,
        shifter.tyre_circumference,
        last_speed,
    );

    let forward = last_speed > 0.0;
    let (best, names) = if forward {
        (best_gear(&forward_rpms, target), &shifter.forward_gear_names)
    } else {
        (best_gear(&reverse_rpms, target), &shifter.reverse_gear_names)
    };

    match best {
        Some(gear) => {
            shifter.best_gear_name = names.get(&gear).cloned().unwrap_or_else(|| NEUTRAL.to_string());
            shifter.best_gear = if forward { gear as i64 } else { -(gear as i64) };
        }
        None => {
            shifter.best_gear = 0;
            shifter.best_gear_name = NEUTRAL.to_string();
        }
    }

    shifter.forward_speed_at_1500_rpm = forward_speeds;
    shifter.reverse_speed_at_1500_rpm = reverse_speeds;
    shifter.forward_rpm_at_current_speed = forward_rpms;
    shifter.reverse_rpm_at_current_speed = reverse_rpms;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(table: &Indexed<String>) -> Vec<&str> {
        table.values().map(String::as_str).collect()
    }

    fn target() -> GearTarget {
        GearTarget {
            rpm: 1300.0,
            tolerance: 1500.0,
        }
    }

    #[test]
    fn test_trailer_aggregation() {
        let mut doc = Document::new();
        doc.trailers.get_mut(&0).unwrap().present = true;
        doc.trailers.get_mut(&0).unwrap().id = "flatbed".to_string();
        doc.trailers.get_mut(&2).unwrap().present = true;

        recount_trailers(&mut doc);
        assert_eq!(doc.trailer_count, 2);
        assert_eq!(doc.trailer, doc.trailers[&0]);
        assert_eq!(doc.trailer.id, "flatbed");
    }

    #[test]
    fn test_gear_names_twelve_speed_variants() {
        let (forward, reverse) = gear_names("hshifter", 12, 1, GameVariant::Ets2);
        assert_eq!(forward.len(), 13);
        assert_eq!(&names(&forward)[..5], &["N", "1L", "1H", "2L", "2H"]);
        assert_eq!(names(&reverse), vec!["N", "R1"]);

        let (forward, _) = gear_names("hshifter", 12, 1, GameVariant::Ats);
        assert_eq!(
            names(&forward),
            vec!["N", "1", "2", "3", "4", "5L", "5H", "6L", "6H", "7L", "7H", "8L", "8H"]
        );
    }

    #[test]
    fn test_gear_names_other_layouts() {
        let (forward, reverse) = gear_names("hshifter", 18, 4, GameVariant::Ets2);
        assert_eq!(forward.len(), 19);
        assert_eq!(forward[&1], "LL");
        assert_eq!(names(&reverse), vec!["N", "R1L", "R1H", "R2L", "R2H"]);

        let (forward, _) = gear_names("hshifter", 14, 2, GameVariant::Ets2);
        assert_eq!(forward[&1], "C1");
        let (forward, reverse) = gear_names("hshifter", 14, 2, GameVariant::Ats);
        assert_eq!(forward[&1], "LL");
        assert_eq!(names(&reverse), vec!["N", "RL", "RH"]);
    }

    #[test]
    fn test_gear_names_sequential_fallback() {
        let (forward, reverse) = gear_names("hshifter", 10, 1, GameVariant::Ets2);
        assert_eq!(names(&forward), vec!["N", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
        assert_eq!(names(&reverse), vec!["N", "R1"]);

        let (forward, reverse) = gear_names("automatic", 12, 3, GameVariant::Ets2);
        assert_eq!(forward[&12], "12");
        assert_eq!(names(&reverse), vec!["N", "R1", "R2", "R3"]);
    }

    #[test]
    fn test_displayed_gear_name() {
        let mut shifter = Shifter::default();
        assert_eq!(displayed_gear_name(&shifter, 3), "N");

        let (forward, reverse) = gear_names("hshifter", 12, 2, GameVariant::Ets2);
        shifter.forward_gear_names = forward;
        shifter.reverse_gear_names = reverse;

        assert_eq!(displayed_gear_name(&shifter, 0), "N");
        assert_eq!(displayed_gear_name(&shifter, 3), "2L");
        assert_eq!(displayed_gear_name(&shifter, -2), "RH");
        assert_eq!(displayed_gear_name(&shifter, 40), "N");
    }

    #[test]
    fn test_tyre_circumference() {
        let mut truck = Truck::default();
        truck.wheels.get_mut(&2).unwrap().radius = 0.5;
        truck.wheels.get_mut(&4).unwrap().radius = 0.55;

        truck.wheel_count = 2;
        assert_eq!(tyre_circumference(&truck), 0.0);

        truck.wheel_count = 6;
        assert!((tyre_circumference(&truck) - PI).abs() < 1e-9);

        truck.wheels.get_mut(&4).unwrap().powered = true;
        assert!((tyre_circumference(&truck) - 1.1 * PI).abs() < 1e-9);

        truck.wheel_count = 4;
        assert!((tyre_circumference(&truck) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_slot_count() {
        let mut shifter = Shifter::default();
        shifter.handle_positions.insert(5, 2);
        assert_eq!(slot_count(&shifter), 1);

        shifter.shifter_type = "hshifter".to_string();
        assert_eq!(slot_count(&shifter), 6);

        shifter.clear_layout();
        assert_eq!(slot_count(&shifter), 1);
    }

    #[test]
    fn test_best_gear_picks_closest_rpm() {
        let table = Indexed::from([(0, 0), (1, 1250), (2, 1310), (3, 1450)]);
        assert_eq!(best_gear(&table, &target()), Some(2));

        let far = Indexed::from([(0, 0), (1, 4000)]);
        assert_eq!(best_gear(&far, &target()), None);
    }

    #[test]
    fn test_shifter_tables_reset_without_prerequisites() {
        let mut doc = Document::new();
        doc.shifter.best_gear = 4;
        refresh_shifter_tables(&mut doc, 10.0, &target());

        assert_eq!(doc.shifter.forward_speed_at_1500_rpm, zeroed());
        assert_eq!(doc.shifter.reverse_rpm_at_current_speed, zeroed());
        assert_eq!(doc.shifter.best_gear, 0);
        assert_eq!(doc.shifter.best_gear_name, "N");
    }

    #[test]
    fn test_shifter_tables_and_best_gear() {
        let mut doc = Document::new();
        let shifter = &mut doc.shifter;
        shifter.forward_gears = 3;
        shifter.reverse_gears = 1;
        shifter.differential_ratio = 2.0;
        shifter.tyre_circumference = 3.0;
        shifter.forward_gear_ratios = Indexed::from([(0, 10.0), (1, 5.0), (2, 2.5)]);
        shifter.reverse_gear_ratios = Indexed::from([(0, -10.0)]);
        let (forward, reverse) = gear_names("automatic", 3, 1, GameVariant::Ets2);
        shifter.forward_gear_names = forward;
        shifter.reverse_gear_names = reverse;

        // 10 m/s: rpm = 60 * 10 * 2 * ratio / 3 = 400 * ratio
        refresh_shifter_tables(&mut doc, 10.0, &target());
        let shifter = &doc.shifter;
        assert_eq!(shifter.forward_rpm_at_current_speed, Indexed::from([(0, 0), (1, 4000), (2, 2000), (3, 1000)]));
        assert_eq!(shifter.forward_speed_at_1500_rpm[&1], 14);
        assert_eq!(shifter.reverse_speed_at_1500_rpm[&1], -14);
        assert_eq!(shifter.best_gear, 3);
        assert_eq!(shifter.best_gear_name, "3");

        refresh_shifter_tables(&mut doc, -3.25, &target());
        assert_eq!(doc.shifter.reverse_rpm_at_current_speed[&1], 1300);
        assert_eq!(doc.shifter.best_gear, -1);
        assert_eq!(doc.shifter.best_gear_name, "R1");
    }

    #[test]
    fn test_speed_at_1500_rpm_covers_every_gear() {
        let ratios = Indexed::from([(0, 10.0), (1, 5.0), (2, 2.5)]);
        let circumference = std::f64::consts::PI;

        let (speeds, _) = speed_tables(&ratios, 3, 2.0, circumference, 0.0);
        // Top gear uses the last ratio
        assert_eq!(speeds, Indexed::from([(0, 0), (1, 14), (2, 28), (3, 57)]));

        // The speed column is the inverse of the rpm column
        for (index, ratio) in &ratios {
            let kph = 90.0 * circumference / (2.0 * ratio);
            let (_, rpms) = speed_tables(&ratios, 3, 2.0, circumference, kph / 3.6);
            assert_eq!(rpms[&(index + 1)], 1500);
        }
    }
}
