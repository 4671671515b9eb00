#[derive(Default, Debug, Clone, Copy)]
pub struct Metrics {
    pub triangles_drawn: usize,
    pub triangles_culled: usize,
    pub degenerate_skipped: usize,
    pub rows_emitted: u64,
    pub pixels_filled: u64,
    pub depth_rejected: u64,
    #[cfg(feature = "performance-counters")]
    pub performance_counters: perf_counters::PerformanceCounters,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics::default()
    }

    /// Adds up the counters of `other`, e.g. the metrics of another band of the same frame.
    pub fn merge(&mut self, other: &Metrics) {
        self.triangles_drawn += other.triangles_drawn;
        self.triangles_culled += other.triangles_culled;
        self.degenerate_skipped += other.degenerate_skipped;
        self.rows_emitted += other.rows_emitted;
        self.pixels_filled += other.pixels_filled;
        self.depth_rejected += other.depth_rejected;
        #[cfg(feature = "performance-counters")]
        self.performance_counters.merge(&other.performance_counters);
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let &Metrics {
            triangles_drawn,
            triangles_culled,
            degenerate_skipped,
            rows_emitted,
            pixels_filled,
            depth_rejected,
            #[cfg(feature = "performance-counters")]
            performance_counters,
        } = self;
        writeln!(f, "render metrics:")?;
        writeln!(f, "\ttriangles drawn: {triangles_drawn}")?;
        writeln!(f, "\ttriangles culled: {triangles_culled}")?;
        writeln!(f, "\tdegenerate triangles: {degenerate_skipped}")?;
        writeln!(f, "\trows: {rows_emitted}")?;
        writeln!(f, "\tpixels filled: {pixels_filled}")?;
        writeln!(f, "\tdepth test failures: {depth_rejected}")?;
        #[cfg(feature = "performance-counters")]
        write!(f, "{performance_counters}")?;
        Ok(())
    }
}

#[cfg(feature = "performance-counters")]
pub mod perf_counters {
    use std::fmt;

    /// Cycles spent in one instrumented section, and how many times it ran.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct Counter {
        pub hits: u64,
        pub cycles: u64,
    }

    impl Counter {
        fn merge(&mut self, other: &Counter) {
            self.hits += other.hits;
            self.cycles += other.cycles;
        }
    }

    impl fmt::Display for Counter {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            let &Counter { hits, cycles } = self;
            if hits == 0 {
                return write!(f, "-");
            }
            let cy_per_hit = cycles as f64 / hits as f64;
            write!(f, "{hits} hits, {cycles} cycles, {cy_per_hit:.2} cycles/hit")
        }
    }

    #[derive(Debug, Default, Clone, Copy)]
    pub struct PerformanceCounters {
        /// One whole triangle sweep.
        pub sweep: Counter,
        /// One span, depth test included.
        pub fill_span: Counter,
    }

    impl PerformanceCounters {
        pub fn merge(&mut self, other: &PerformanceCounters) {
            self.sweep.merge(&other.sweep);
            self.fill_span.merge(&other.fill_span);
        }
    }

    impl fmt::Display for PerformanceCounters {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            writeln!(f, "performance counters:")?;
            writeln!(f, "	sweep: {}", self.sweep)?;
            writeln!(f, "	fill_span: {}", self.fill_span)
        }
    }
}
