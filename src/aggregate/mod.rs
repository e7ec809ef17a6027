/// Pure join-and-aggregate pipeline over the upstream collections.
///
/// Every widget endpoint routes through the same join (launches -> missions
/// -> payloads) so the filtering semantics cannot drift between widgets.
/// Nothing in this module performs I/O; given identical input collections
/// the output is identical.
use crate::domain::{
    Launch, LaunchRow, LaunchSummary, Mission, MissionMass, NationalitySlice, Payload, SortColumn,
    LAUNCHPAD_ALL_ID,
};
use crate::utils::color_from_string;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Number of missions shown in the top-missions table
pub const TOP_MISSIONS_COUNT: usize = 5;

/// Number of rows the nationality data table is capped to (the chart shows
/// the full distribution)
pub const NATIONALITY_TABLE_CAP: usize = 5;

/// Translate the "All Launch Sites" sentinel to an absent filter value.
/// Any other id passes through unchanged.
pub fn effective_site_id(id: &str) -> Option<&str> {
    if id == LAUNCHPAD_ALL_ID {
        None
    } else {
        Some(id)
    }
}

/// Collect the unique, non-empty mission ids referenced by the launches.
/// A launch without mission ids contributes nothing. The upstream shape
/// suggests at most one id per launch; more than one is tolerated but
/// logged because the aggregates assume the one-mission case.
pub fn relevant_mission_ids(launches: &[Launch]) -> HashSet<String> {
    let mut ids = HashSet::new();
    for launch in launches {
        if launch.mission_id.len() > 1 {
            warn!(
                mission_name = launch.mission_name.as_deref().unwrap_or("<unnamed>"),
                count = launch.mission_id.len(),
                "launch references more than one mission id"
            );
        }
        for id in &launch.mission_id {
            if !id.is_empty() {
                ids.insert(id.clone());
            }
        }
    }
    ids
}

/// Filter missions to those referenced by the launches under the current
/// filter, preserving upstream order.
pub fn relevant_missions<'a>(launches: &[Launch], missions: &'a [Mission]) -> Vec<&'a Mission> {
    let ids = relevant_mission_ids(launches);
    missions.iter().filter(|m| ids.contains(&m.id)).collect()
}

/// Collect the unique, non-null payload ids referenced across the missions'
/// payload lists. A payload id claimed by more than one mission would be
/// double-counted downstream, so violations of the one-mission-per-payload
/// assumption are logged.
pub fn relevant_payload_ids(missions: &[&Mission]) -> HashSet<String> {
    let mut owner: HashMap<&str, &str> = HashMap::new();
    let mut ids = HashSet::new();
    for mission in missions {
        for payload_ref in mission.payloads.iter().flatten() {
            let Some(id) = payload_ref.id.as_deref() else {
                continue;
            };
            if let Some(previous) = owner.insert(id, mission.id.as_str()) {
                if previous != mission.id {
                    warn!(
                        payload_id = id,
                        first_mission = previous,
                        second_mission = %mission.id,
                        "payload referenced by more than one mission; totals may double-count"
                    );
                }
            }
            ids.insert(id.to_string());
        }
    }
    ids
}

/// The shared join: payloads belonging to a mission that launched under the
/// current filter, in upstream payload order.
pub fn joined_payloads<'a>(
    launches: &[Launch],
    missions: &[Mission],
    payloads: &'a [Payload],
) -> Vec<&'a Payload> {
    let missions = relevant_missions(launches, missions);
    let ids = relevant_payload_ids(&missions);
    payloads
        .iter()
        .filter(|p| p.id.as_deref().is_some_and(|id| ids.contains(id)))
        .collect()
}

/// Payload count by nationality, sorted by count descending. The sort is
/// stable, so nationalities with equal counts keep first-insertion order.
/// Payloads without a nationality are skipped entirely, not bucketed as
/// "unknown".
pub fn nationality_distribution(payloads: &[&Payload]) -> Vec<NationalitySlice> {
    let mut slices: Vec<NationalitySlice> = Vec::new();
    for payload in payloads {
        if payload.id.is_none() {
            continue;
        }
        let Some(nationality) = payload.nationality.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        match slices.iter_mut().find(|s| s.title == nationality) {
            Some(slice) => slice.value += 1,
            None => slices.push(NationalitySlice {
                title: nationality.to_string(),
                value: 1,
                color: color_from_string(nationality),
            }),
        }
    }
    slices.sort_by(|a, b| b.value.cmp(&a.value));
    slices
}

/// Top missions by total payload mass.
///
/// Qualifying missions (non-empty payload list and a name) are taken in
/// upstream order, truncated to `TOP_MISSIONS_COUNT`, and only then sorted
/// by mass descending. Truncating before sorting can miss a heavier mission
/// that appears later upstream; that ordering is preserved deliberately for
/// parity with the dashboard this service replaces.
pub fn top_missions_by_mass(
    launches: &[Launch],
    missions: &[Mission],
    payloads: &[Payload],
) -> Vec<MissionMass> {
    let mut rows: Vec<MissionMass> = Vec::new();
    for mission in relevant_missions(launches, missions) {
        if rows.len() == TOP_MISSIONS_COUNT {
            break;
        }
        let Some(name) = mission.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        // A mission qualifies on a non-empty payload-reference list, even if
        // every entry turns out null; such a mission reports 0 kg.
        if mission.payloads.is_empty() {
            continue;
        }
        let ids: HashSet<&str> = mission
            .payloads
            .iter()
            .flatten()
            .filter_map(|p| p.id.as_deref())
            .collect();

        let mass_kg: f64 = payloads
            .iter()
            .filter(|p| p.id.as_deref().is_some_and(|id| ids.contains(id)))
            .filter_map(|p| p.payload_mass_kg)
            .sum();

        rows.push(MissionMass {
            title: name.to_string(),
            mass_kg,
            bar_fraction: 0.0,
        });
    }

    rows.sort_by(|a, b| b.mass_kg.total_cmp(&a.mass_kg));

    let max = rows.iter().map(|r| r.mass_kg).fold(0.0_f64, f64::max);
    for row in &mut rows {
        row.bar_fraction = if max > 0.0 { row.mass_kg / max } else { 0.0 };
    }
    rows
}

/// Summary totals over the joined payloads: count, mean mass and unique
/// customer count. A payload with no recorded mass (or a zero mass, which
/// the upstream data never distinguishes from absent) is not counted. The
/// average is `None` when nothing qualified; it must never surface as NaN.
pub fn payload_summary(payloads: &[&Payload]) -> LaunchSummary {
    let mut total = 0_u64;
    let mut mass_sum = 0.0_f64;
    let mut customers: HashSet<&str> = HashSet::new();

    for payload in payloads {
        if payload.id.is_none() {
            continue;
        }
        let Some(mass) = payload.payload_mass_kg.filter(|m| *m != 0.0) else {
            continue;
        };
        total += 1;
        mass_sum += mass;
        if let Some(names) = &payload.customers {
            customers.extend(names.iter().map(String::as_str));
        }
    }

    LaunchSummary {
        total_payloads: total,
        avg_payload_mass_kg: (total > 0).then(|| mass_sum / total as f64),
        unique_customer_count: customers.len() as u64,
    }
}

/// Flatten launches into table rows, silently dropping records missing any
/// display field: mission name, date, boolean success flag, rocket (name and
/// nested payload weights), site name, at least one mission id.
pub fn build_launch_rows(launches: &[Launch]) -> Vec<LaunchRow> {
    launches
        .iter()
        .filter_map(|launch| {
            let mission_name = launch.mission_name.as_deref().filter(|n| !n.is_empty())?;
            let launch_date_unix = launch.launch_date_unix?;
            let launch_success = launch.launch_success?;
            let rocket = launch.rocket.as_ref()?;
            let rocket_name = rocket.rocket_name.as_deref()?;
            let spec = rocket.rocket.as_ref()?;
            let site = launch.launch_site.as_ref()?;
            let site_name = site.site_name.as_deref().filter(|n| !n.is_empty())?;
            let mission_id = launch.mission_id.first()?;

            let kg: f64 = spec
                .payload_weights
                .iter()
                .map(|w| w.kg.unwrap_or(0.0))
                .sum();

            Some(LaunchRow {
                mission_name: mission_name.to_string(),
                launch_date_unix,
                launch_success,
                rocket_name: rocket_name.to_string(),
                kg,
                site_name: site_name.to_string(),
                mission_id: mission_id.clone(),
            })
        })
        .collect()
}

/// Sort table rows by the given column.
///
/// The comparator keeps the original dashboard's semantics: string columns
/// compare lexicographically with the direction flag inverting the sign
/// (descending=true yields *ascending* lexicographic order), numeric and
/// boolean columns put the largest value first when descending. Ties break
/// on mission id ascending so equal keys order reproducibly.
pub fn sort_launch_rows(rows: &mut [LaunchRow], column: SortColumn, descending: bool) {
    rows.sort_by(|a, b| {
        let primary = match column {
            SortColumn::MissionName => cmp_str(&a.mission_name, &b.mission_name, descending),
            SortColumn::LaunchDateUnix => cmp_num(
                a.launch_date_unix as f64,
                b.launch_date_unix as f64,
                descending,
            ),
            SortColumn::LaunchSuccess => cmp_num(
                u8::from(a.launch_success) as f64,
                u8::from(b.launch_success) as f64,
                descending,
            ),
            SortColumn::RocketName => cmp_str(&a.rocket_name, &b.rocket_name, descending),
            SortColumn::Kg => cmp_num(a.kg, b.kg, descending),
            SortColumn::SiteName => cmp_str(&a.site_name, &b.site_name, descending),
            SortColumn::MissionId => cmp_str(&a.mission_id, &b.mission_id, descending),
        };
        primary.then_with(|| a.mission_id.cmp(&b.mission_id))
    });
}

fn cmp_str(a: &str, b: &str, descending: bool) -> Ordering {
    let ord = a.cmp(b);
    if descending {
        ord
    } else {
        ord.reverse()
    }
}

fn cmp_num(a: f64, b: f64, descending: bool) -> Ordering {
    if descending {
        b.total_cmp(&a)
    } else {
        a.total_cmp(&b)
    }
}

/// Slice out the requested page. An absent offset starts at the first row;
/// an absent limit returns everything from the offset on.
pub fn paginate(rows: Vec<LaunchRow>, offset: Option<usize>, limit: Option<usize>) -> Vec<LaunchRow> {
    rows.into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Message shown when the table has no rows. A set, non-empty search term
/// means the search matched nothing; otherwise the site genuinely has no
/// launches. (A submitted empty-string search still reaches the upstream
/// query, but reads as "no search" here, matching the original UI.)
pub fn empty_state_message(searched_mission_name: Option<&str>) -> &'static str {
    match searched_mission_name {
        Some(term) if !term.is_empty() => "Your search yielded 0 results.",
        _ => "SpaceX has not launched any payloads at this site.",
    }
}
