// Integration test for the line processor with realistic device link output
use std::sync::Arc;
use std::thread;

use ccfilter::config::{Config, DisplayConfig, SuppressionConfig};
use ccfilter::filtering::{Category, Decision, LineProcessor, SharedProcessor, StreamRegistry};

/// One polling round of a coin acceptor: request, raw response, decoded response
fn poll_round() -> Vec<&'static str> {
    vec![
        "> ccTalk request: SimplePoll (254), address 2",
        "< Response: 01 00 02 00 fd",
        "< ccTalk response: ACK",
    ]
}

#[test]
fn test_polling_loop_is_collapsed() {
    let mut processor = LineProcessor::default();

    let mut input = vec![
        "* Coin acceptor configured device: /dev/ttyUSB0",
        "* Device initialized",
    ];
    for _ in 0..200 {
        input.extend(poll_round());
    }
    input.push("! Device stopped responding");

    let output = processor.filter_lines(input.iter());

    println!("Polling loop filtering:");
    for line in &output {
        println!("  {}", line);
    }

    // Header, a handful of warm-up lines, the error, and nothing else
    assert_eq!(output.first().map(String::as_str), Some(input[0]));
    assert_eq!(output.last().map(String::as_str), Some("! Device stopped responding"));
    assert!(output.len() < 30);

    let stats = processor.stats();
    assert_eq!(stats.lines as usize, input.len());
    assert!(stats.suppression_ratio() > 0.9);
}

#[test]
fn test_single_line_flood_schedule() {
    let mut processor = LineProcessor::default();
    let line = "< ccTalk response: ACK";

    let results: Vec<Option<String>> = (0..42).map(|_| processor.process(line, false)).collect();

    let shown: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_some())
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(shown, vec![1, 2, 3, 40]);
    assert_eq!(
        results[39].as_deref(),
        Some("- The last message was repeated 40 times total")
    );
}

#[test]
fn test_request_response_oscillation() {
    let mut processor = LineProcessor::default();
    let pair = ["> ccTalk request: SimplePoll", "< ccTalk response: ACK"];

    let processed: Vec<_> = (0..160)
        .map(|i| processor.process_line(pair[i % 2]))
        .collect();

    let summaries: Vec<(usize, Decision)> = processed
        .iter()
        .enumerate()
        .filter(|(_, p)| matches!(p.decision, Decision::Summary { .. }))
        .map(|(i, p)| (i + 1, p.decision))
        .collect();

    assert_eq!(
        summaries,
        vec![
            (
                80,
                Decision::Summary {
                    window: 2,
                    count: 40
                }
            ),
            (
                160,
                Decision::Summary {
                    window: 2,
                    count: 80
                }
            ),
        ]
    );
    assert_eq!(
        processed[79].text.as_deref(),
        Some("- The last 2 messages were repeated 40 times total")
    );

    // Categories come from the raw line, not from the summary
    assert_eq!(processed[79].category, Category::CcTalkResponse);
    assert_eq!(processed[78].category, Category::CcTalkRequest);
}

#[test]
fn test_new_streak_announces_fresh() {
    let mut processor = LineProcessor::default();

    for _ in 0..45 {
        processor.process_line("! Timeout");
    }
    processor.process_line("* Reconnected");

    let counts: Vec<u32> = (0..80)
        .filter_map(|_| match processor.process_line("! Timeout").decision {
            Decision::Summary { count, .. } => Some(count),
            _ => None,
        })
        .collect();

    // Counting restarted at 1 after the interruption
    assert_eq!(counts, vec![40, 80]);
}

#[test]
fn test_processor_from_loaded_config() {
    let config = Config::from_toml_str(
        r#"
[display]
show_full_response = true
show_cctalk_request = false

[suppression]
threshold = 2
step = 10
window_sizes = [1, 2]
"#,
    )
    .unwrap();

    let mut processor = LineProcessor::from_config(&config);
    assert_eq!(processor.window_sizes(), vec![1, 2]);

    let visible = processor.filter_lines(std::iter::repeat("< Full response: 00").take(30));
    assert_eq!(
        visible,
        vec![
            "< Full response: 00".to_string(),
            "< Full response: 00".to_string(),
            "- The last message was repeated 10 times total".to_string(),
            "- The last message was repeated 20 times total".to_string(),
            "- The last message was repeated 30 times total".to_string(),
        ]
    );

    let full = processor.process_line("< Full response: 01");
    assert_eq!(full.color, Category::FullResponse.color());
    let request = processor.process_line("> ccTalk request: Poll");
    assert_eq!(request.color, Category::Default.color());
}

#[test]
fn test_concurrent_producers_on_registry() {
    let registry = Arc::new(StreamRegistry::new(Arc::new(Config::default())));

    let handles: Vec<_> = ["coin_acceptor", "bill_validator"]
        .into_iter()
        .map(|device| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                (0..100)
                    .filter(|_| registry.process(device, "< ccTalk response: ACK", false).is_some())
                    .count()
            })
        })
        .collect();

    for handle in handles {
        // 3 verbatim + summaries at 40 and 80, per device
        assert_eq!(handle.join().unwrap(), 5);
    }
    assert_eq!(registry.active_streams(), 2);
}

#[test]
fn test_shared_processor_matches_single_threaded() {
    let shared = SharedProcessor::new(LineProcessor::new(
        &SuppressionConfig::default(),
        DisplayConfig::default(),
    ));
    let mut plain = LineProcessor::default();

    for i in 0..300 {
        let line = if i % 7 == 0 { "* tick" } else { "> Request: 01" };
        assert_eq!(shared.process_line(line), plain.process_line(line));
    }
}
