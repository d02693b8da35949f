//! Cycle benchmark: one read → write exchange against the simulated
//! controller, per joint count and receive multiplier.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fri_common::hardware::config::{ClientConfig, CommandMode};
use fri_common::hardware::info::HardwareInfo;
use fri_common::hardware::interface::SystemInterface;
use fri_hardware::RobotControlClient;
use fri_hardware::drivers::simulation::SimulatedSession;
use std::hint::black_box;

fn active_client(joints: usize, mode: CommandMode, receive_multiplier: u32) -> RobotControlClient {
    let config = ClientConfig {
        command_mode: mode,
        receive_multiplier,
        ..Default::default()
    };
    let mut client = RobotControlClient::new(Box::new(SimulatedSession::new()), config).unwrap();
    let mut info = HardwareInfo::lbr_arm("bench");
    info.joints.truncate(joints);
    client.initialize(&info).unwrap();
    client.activate().unwrap();
    client
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("client_cycle");
    group.sample_size(500);

    for joints in [1usize, 7] {
        for mode in [CommandMode::Position, CommandMode::Torque] {
            let mut client = active_client(joints, mode, 1);
            let label = format!("{mode:?}/{joints}");
            group.bench_with_input(BenchmarkId::new("joints", label), &joints, |b, _| {
                let mut t = 0.0_f64;
                b.iter(|| {
                    t += 0.001;
                    client.read().unwrap();
                    for j in 0..joints {
                        client.set_command_value(2 * j, t.sin()).unwrap();
                    }
                    client.write().unwrap();
                    black_box(client.outgoing_command());
                });
            });
        }
    }

    for multiplier in [1u32, 4] {
        let mut client = active_client(7, CommandMode::Position, multiplier);
        group.bench_with_input(
            BenchmarkId::new("receive_multiplier", multiplier),
            &multiplier,
            |b, _| {
                b.iter(|| {
                    client.read().unwrap();
                    client.write().unwrap();
                    black_box(client.receive_counter());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_cycle);
criterion_main!(benches);
