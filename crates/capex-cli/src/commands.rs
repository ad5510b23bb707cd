use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use capex_contract::{Capex, Chaincode, QueryResult, TransactionContext};
use capex_state::FileWorldState;

use crate::cli::*;
use crate::config::HostConfig;

pub fn run_command(cli: Cli, config: &HostConfig) -> anyhow::Result<()> {
    let chaincode = Chaincode::default();
    let out = Printer {
        format: cli.format,
        pretty: config.pretty_json,
    };

    if let Command::Metadata = cli.command {
        return out.json(&chaincode.metadata());
    }

    let state = FileWorldState::open(&config.state_path)
        .with_context(|| format!("opening world state {}", config.state_path.display()))?;
    let ctx = TransactionContext::new(&state);
    tracing::debug!(tx_id = ctx.tx_id(), state = %config.state_path.display(), "transaction started");
    let contract = chaincode.contract();

    match cli.command {
        Command::InitLedger => {
            contract.init_ledger(&ctx)?;
            out.done(&format!("Ledger initialized with {} records", capex_contract::SEED_COUNT))
        }
        Command::Create(args) => {
            contract.create_transaction(&ctx, &args.id, &args.bu, &args.cocd, &args.docno, &args.mru)?;
            out.done(&format!("Created {}", args.id.yellow()))
        }
        Command::Query(args) => {
            let record = contract.query_transaction(&ctx, &args.id)?;
            out.record(&args.id, &record)
        }
        Command::QueryAll => {
            let results = contract.query_all_transactions(&ctx)?;
            out.records(&results)
        }
        Command::Change(args) => {
            contract.change_transaction(&ctx, &args.id, &args.new_mru)?;
            out.done(&format!("Changed MRU of {} to {}", args.id.yellow(), args.new_mru.bold()))
        }
        Command::Invoke(args) => {
            let payload = chaincode.invoke(&ctx, &args.function, &args.args)?;
            if payload.is_empty() {
                out.done(&format!("{} committed", args.function.bold()))
            } else {
                println!("{}", String::from_utf8_lossy(&payload));
                Ok(())
            }
        }
        Command::Metadata => out.json(&chaincode.metadata()),
    }
}

struct Printer {
    format: OutputFormat,
    pretty: bool,
}

impl Printer {
    fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{text}");
        Ok(())
    }

    fn done(&self, message: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&serde_json::json!({ "ok": true })),
            OutputFormat::Text => {
                println!("{} {}", "✓".green().bold(), message);
                Ok(())
            }
        }
    }

    fn record(&self, key: &str, record: &Capex) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(record),
            OutputFormat::Text => {
                println!("{}", key.yellow().bold());
                print_fields(record);
                Ok(())
            }
        }
    }

    fn records(&self, results: &[QueryResult]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&results),
            OutputFormat::Text => {
                if results.is_empty() {
                    println!("No records.");
                }
                for result in results {
                    println!("{}", result.key.yellow().bold());
                    print_fields(&result.record);
                }
                Ok(())
            }
        }
    }
}

fn print_fields(record: &Capex) {
    println!("  BU:    {}", record.bu);
    println!("  COCD:  {}", record.cocd);
    println!("  DOCNO: {}", record.docno);
    println!("  MRU:   {}", record.mru.cyan());
}
