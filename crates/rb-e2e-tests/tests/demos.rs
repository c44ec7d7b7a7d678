//! The shipped demo config and dataset must stay loadable.

use rb_bot::{BotConfig, load_reference_data};
use rb_engine::{Catalog, Directive, Interpreter};
use std::path::Path;
use std::sync::Arc;

const DEMOS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos");

#[test]
fn e2e_demo_config_parses() {
    let config = BotConfig::from_file(&format!("{DEMOS}/bot.toml")).unwrap();
    assert_eq!(config.channel.bot_id, "U0BOT");
    assert!(config.channel.is_observed("C-ids"));
}

#[test]
fn e2e_demo_dataset_answers_questions() {
    let data = load_reference_data(&Path::new(DEMOS).join("dataset.json")).unwrap();
    assert_eq!(data.table_count(), 3);

    let interpreter = Interpreter::new(Arc::new(Catalog::new(data)), "refbot");
    let Directive::Reply(replies) = interpreter.interpret("classpart 1051") else {
        panic!("expected replies");
    };
    assert_eq!(
        replies[0].as_text(),
        Some("The classpart 1051 indicates the table SYSCODE")
    );
}
