//! End-to-end engine behaviour against a scripted source and manual clock.

mod common;

use std::time::Duration;

use common::{proc, FakeSource, ManualClock};
use cybermon_sampler::{
    Battery, DiskIoCounters, EngineConfig, LoadAvg, MemoryUsage, SamplingEngine, SourceError,
};

fn engine(source: FakeSource, clock: &ManualClock) -> SamplingEngine<FakeSource, ManualClock> {
    SamplingEngine::with_clock(source, clock.clone(), EngineConfig::default())
}

#[test]
fn net_out_rate_from_two_samples_one_second_apart() {
    let clock = ManualClock::new();
    // baseline at t=0 is taken in the constructor
    let mut e = engine(FakeSource::new().net_sent(&[1_000, 3_000]), &clock);
    clock.advance(Duration::from_secs(1));
    let snap = e.tick();
    assert_eq!(snap.rates.net_out_bps, 2_000.0);
    assert_eq!(snap.rates.net_in_bps, 0.0);
}

#[test]
fn each_counter_sample_is_consumed_once() {
    let clock = ManualClock::new();
    let mut e = engine(
        FakeSource::new().net_sent(&[0, 1_000, 4_000, 4_000]),
        &clock,
    );
    let mut rates = Vec::new();
    for _ in 0..3 {
        clock.advance(Duration::from_secs(1));
        rates.push(e.tick().rates.net_out_bps);
    }
    assert_eq!(rates, vec![1_000.0, 3_000.0, 0.0]);
}

#[test]
fn counter_reset_reports_zero() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new().net_sent(&[50_000, 100]), &clock);
    clock.advance(Duration::from_secs(2));
    let snap = e.tick();
    assert_eq!(snap.rates.net_out_bps, 0.0);
}

#[test]
fn same_instant_ticks_use_one_second() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new().net_sent(&[0, 512]), &clock);
    let snap = e.tick();
    assert_eq!(snap.rates.net_out_bps, 512.0);
}

#[test]
fn disk_rates_follow_disk_counters() {
    let clock = ManualClock::new();
    let mut src = FakeSource::new().net_sent(&[0]);
    src.disk_io = [
        DiskIoCounters {
            read_bytes: 0,
            write_bytes: 1_000,
        },
        DiskIoCounters {
            read_bytes: 8_000,
            write_bytes: 3_000,
        },
    ]
    .into();
    let mut e = engine(src, &clock);
    clock.advance(Duration::from_secs(4));
    let snap = e.tick();
    assert_eq!(snap.rates.disk_read_bps, 2_000.0);
    assert_eq!(snap.rates.disk_write_bps, 500.0);
}

#[test]
fn failed_counter_read_keeps_last_rates_and_baseline() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new().net_sent(&[0, 1_000, 5_000]), &clock);
    clock.advance(Duration::from_secs(1));
    assert_eq!(e.tick().rates.net_out_bps, 1_000.0);

    e.source_mut().counters_fail = true;
    clock.advance(Duration::from_secs(1));
    assert_eq!(e.tick().rates.net_out_bps, 1_000.0);

    // diffed against the last good sample, 2s earlier
    e.source_mut().counters_fail = false;
    clock.advance(Duration::from_secs(1));
    assert_eq!(e.tick().rates.net_out_bps, 2_000.0);
}

#[test]
fn cpu_history_ends_with_the_latest_readings() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new().cpu(&[10.0, 20.0, 30.0]), &clock);
    let mut last = None;
    for _ in 0..3 {
        last = Some(e.tick());
    }
    let history = last.map(|s| s.cpu_history).unwrap_or_default();
    assert_eq!(history.len(), 40);
    assert_eq!(&history[37..], &[10.0, 20.0, 30.0]);
    assert!(history[..37].iter().all(|&v| v == 0.0));
}

#[test]
fn missing_cpu_reading_does_not_shift_history() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new(), &clock);
    let snap = e.tick();
    assert_eq!(snap.cpu_percent, None);
    assert_eq!(snap.cpu_history, vec![0.0; 40]);
}

#[test]
fn processes_refresh_on_first_tick_then_every_second_tick() {
    let clock = ManualClock::new();
    let mut e = engine(
        FakeSource::new().with_processes(vec![proc(1, 5.0), proc(2, 50.0)]),
        &clock,
    );
    let mut calls = Vec::new();
    for _ in 0..5 {
        e.tick();
        calls.push(e.source().process_calls);
    }
    // ticks 0, 2, 4 enumerate
    assert_eq!(calls, vec![1, 1, 2, 2, 3]);
}

#[test]
fn top_five_of_eight_sorted_descending() {
    let clock = ManualClock::new();
    let table = [3.0, 81.0, 17.0, 0.0, 64.0, 22.0, 9.0, 45.0]
        .iter()
        .enumerate()
        .map(|(i, &c)| proc(100 + i as u32, c))
        .collect();
    let mut e = engine(FakeSource::new().with_processes(table), &clock);
    let snap = e.tick();
    let cpus: Vec<f32> = snap.process_top.iter().map(|p| p.cpu_percent).collect();
    assert_eq!(cpus, vec![81.0, 64.0, 45.0, 22.0, 17.0]);
}

#[test]
fn failed_enumeration_serves_the_stale_table() {
    let clock = ManualClock::new();
    let mut src = FakeSource::new();
    src.processes = [
        Ok(vec![proc(7, 12.0)]),
        Err(SourceError::transient("processes", "EPERM")),
    ]
    .into();
    let mut e = engine(src, &clock);
    let first = e.tick().process_top;
    e.tick();
    let after_failure = e.tick().process_top;
    assert_eq!(e.source().process_calls, 2);
    assert_eq!(after_failure, first);
}

#[test]
fn empty_cache_keeps_forcing_until_a_table_arrives() {
    let clock = ManualClock::new();
    let mut src = FakeSource::new();
    src.processes = [
        Err(SourceError::transient("processes", "busy")),
        Ok(vec![proc(1, 1.0)]),
    ]
    .into();
    let mut e = engine(src, &clock);
    assert!(e.tick().process_top.is_empty());
    // tick 1 is off-cadence but the table is still empty
    assert_eq!(e.tick().process_top.len(), 1);
    assert_eq!(e.source().process_calls, 2);
    e.tick();
    e.tick();
    assert_eq!(e.source().process_calls, 3);
}

#[test]
fn optional_metrics_are_absent_not_fatal() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new().cpu(&[42.0]), &clock);
    let snap = e.tick();
    assert_eq!(snap.cpu_percent, Some(42.0));
    assert_eq!(snap.battery, None);
    assert_eq!(snap.load_avg, None);
    assert_eq!(snap.memory, None);
    assert_eq!(snap.uptime_secs, None);
    assert!(snap.disk_usage.is_some());
}

#[test]
fn present_optional_metrics_are_carried() {
    let clock = ManualClock::new();
    let mut src = FakeSource::new();
    src.memory = Some(MemoryUsage::from_used_total(1, 4));
    src.load_avg = Some(LoadAvg {
        one: 0.5,
        five: 0.25,
        fifteen: 0.125,
    });
    src.battery = Some(Battery {
        percent: 15.0,
        plugged: false,
    });
    src.boot_time = Some(1_700_000_000 - 90_061);
    let mut e = engine(src, &clock);
    let snap = e.tick();
    assert_eq!(snap.memory.map(|m| m.percent), Some(25.0));
    assert_eq!(snap.load_avg.map(|l| l.five), Some(0.25));
    assert_eq!(snap.battery.map(|b| b.plugged), Some(false));
    assert_eq!(snap.uptime_secs, Some(90_061));

    clock.advance(Duration::from_secs(10));
    assert_eq!(e.tick().uptime_secs, Some(90_071));
}

#[test]
fn snapshots_carry_tick_and_host() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new(), &clock);
    assert_eq!(e.tick().tick, 0);
    let snap = e.tick();
    assert_eq!(snap.tick, 1);
    assert_eq!(snap.host.node, "testbox");
    assert_eq!(e.tick_count(), 2);
}

#[test]
fn snapshot_serializes_absent_fields_as_null() {
    let clock = ManualClock::new();
    let mut e = engine(FakeSource::new(), &clock);
    let json = serde_json::to_value(e.tick()).unwrap();
    assert!(json["battery"].is_null());
    assert_eq!(json["cpu_history"].as_array().map(|a| a.len()), Some(40));
}
