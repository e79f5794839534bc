/*!
 * Scheduling Policy Benchmarks
 *
 * Compare dispatch cost of every policy under the same workload
 */

use ai_os_sched::core::data_structures::SkewHeap;
use ai_os_sched::{Cpu, SchedParams, SchedulerConfig, SchedulingPolicy};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn loaded_cpu(policy: SchedulingPolicy, procs: u32) -> Cpu {
    let config = SchedulerConfig::new(policy)
        .with_max_time_slice(4)
        .with_capacity(procs as usize)
        .with_mlfq_seed(7);
    let mut cpu = Cpu::new(&config).unwrap();
    for weight in 1..=procs {
        cpu.spawn(
            SchedParams::new(format!("p{weight}"))
                .with_priority(weight)
                .with_fair_priority(weight as i32),
        )
        .unwrap();
    }
    cpu.schedule();
    cpu
}

fn bench_timer_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_tick");

    for policy in SchedulingPolicy::ALL {
        for procs in [8u32, 64] {
            let mut cpu = loaded_cpu(policy, procs);
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), procs),
                &procs,
                |b, _| {
                    b.iter(|| black_box(cpu.timer_tick()));
                },
            );
        }
    }

    group.finish();
}

fn bench_yield(c: &mut Criterion) {
    let mut group = c.benchmark_group("yield");

    for policy in SchedulingPolicy::ALL {
        let mut cpu = loaded_cpu(policy, 32);
        group.bench_function(BenchmarkId::from_parameter(policy.as_str()), |b| {
            b.iter(|| black_box(cpu.yield_current()));
        });
    }

    group.finish();
}

fn bench_skew_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("skew_heap");

    for size in [64usize, 1024] {
        group.bench_with_input(BenchmarkId::new("insert_pop", size), &size, |b, &size| {
            b.iter(|| {
                let mut heap = SkewHeap::with_capacity(size, |x: &u32, y: &u32| x.cmp(y));
                for i in 0..size as u32 {
                    heap.insert(i.wrapping_mul(2_654_435_761));
                }
                while let Some(value) = heap.pop() {
                    black_box(value);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_timer_tick, bench_yield, bench_skew_heap);
criterion_main!(benches);
