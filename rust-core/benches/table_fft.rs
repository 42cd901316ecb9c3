use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::f64::consts::PI;
use table_fft::{Column, FftConfig, Table, TableFft, WindowFunction};

fn signal_table(rows: usize, columns: usize) -> Table {
    let rate = 48000.0;
    let mut table = Table::new()
        .with_column(Column::scalar(
            "time",
            (0..rows).map(|i| i as f64 / rate).collect(),
        ))
        .unwrap();

    for c in 0..columns {
        let freq = 440.0 * (c + 1) as f64;
        let values = (0..rows)
            .map(|i| (2.0 * PI * freq * i as f64 / rate).sin())
            .collect();
        table
            .add_column(Column::scalar(format!("channel_{c}"), values))
            .unwrap();
    }

    table
}

fn bench_whole_input(c: &mut Criterion) {
    let table = signal_table(16384, 4);
    let mut config = FftConfig::default();
    config.set_windowing_function(WindowFunction::Hanning);
    config.set_normalize(true);
    config.set_optimize_for_real_input(true);

    let mut engine = TableFft::new();
    c.bench_function("table_fft_whole_input", |b| {
        b.iter(|| engine.transform(&config, black_box(&table)).unwrap())
    });
}

fn bench_block_average(c: &mut Criterion) {
    let table = signal_table(16384, 4);
    let mut config = FftConfig::default();
    config.set_windowing_function(WindowFunction::Blackman);
    config.set_average_fft(true);
    config.set_block_size(1024);
    config.set_number_of_blocks(8);
    config.set_normalize(true);
    config.set_optimize_for_real_input(true);

    let mut engine = TableFft::new();
    c.bench_function("table_fft_block_average", |b| {
        b.iter(|| engine.transform(&config, black_box(&table)).unwrap())
    });
}

criterion_group!(benches, bench_whole_input, bench_block_average);
criterion_main!(benches);
