#![no_main]

use checkpoint_timer::{MockClock, ReportConfig, TimeChecker, TimeUnit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Neither parser may panic, whatever the input
        let _ = input.parse::<TimeUnit>();

        if let Ok(config) = ReportConfig::from_toml_str(input) {
            let clock = MockClock::new(0);
            let checker = TimeChecker::with_clock(clock.clone());
            checker.record_checkpoint("a");
            clock.advance_ms(1_500);
            checker.record_checkpoint("b");

            let _ = checker.render_report_with(&checker.checkpoints(), &config);
        }
    }
});
