use crate::orchestrator::TurnObserver;
use colored::*;
use std::io::{self, Write};

pub const GOODBYE_MESSAGE: &str =
    "\n👋 Naschledanou! Váš nákupní seznam byl vyčištěn. Díky že jste využili RohBota!";

pub fn print_welcome() {
    println!("🤖 Rohlík Asistent pro plánování jídelníčku a správu nákupního seznamu (RohBot)");
    println!("====================================================");
    println!("💬 Pomůžu ti naplánovat tvůj jídelníček podle exkluzivních rohlíkovských receptů!");
    println!("Můžeš mi poroučet například takto:");
    println!("   • 'připrav mi týdenní plán vegetariánských jídel'");
    println!("   • 'vytvoř mi dokument s jídelníčkem na 2 dny pro vegana'");
    println!("   • 'přidej mrkev na nákupní seznam'");
    println!("   • 'najdi mi recepty na vegetariánské polévky'");
    println!("   • 'co je na mém nákupním seznamu?'");
    println!("   • 'odstraň vše z nákupního seznamu'");
    println!("   • 'odstraň okurku z nákupního seznamu'");
    println!("📝 Napiš 'KONEC' nebo 'STAČILO' k ukončení programu,");
    println!("nebo 'POMOC' pro nápovědu, nebo 'RESET' pro restart konverzace.\n");
}

pub fn print_help() {
    println!("\n🆘 NÁPOVĚDA:");
    println!("{}", "=".repeat(50));
    println!("📋 Dostupné příkazy:");
    println!("   • POMOC - zobrazí tuto nápovědu");
    println!("   • RESET - vymaže historii konverzace a nákupní seznam");
    println!("   • KONEC nebo STAČILO - ukončí program");
    println!("\n🍽️ Příklady dotazů:");
    println!("   • 'najdi mi vegetariánské recepty'");
    println!("   • 'vytvoř jídelníček na 3 dny'");
    println!("   • 'přidej brambory na nákupní seznam'");
    println!("   • 'co mám na seznamu?'");
    println!("   • 'odstraň mléko ze seznamu'");
    println!("{}\n", "=".repeat(50));
}

/// Streams everything to the terminal: model tokens as they arrive plus a
/// line per tool execution. Used by the one-shot demo.
pub struct ConsoleObserver;

impl TurnObserver for ConsoleObserver {
    fn on_token(&self, token: &str) {
        print!("{}", token);
        let _ = io::stdout().flush();
    }

    fn on_tool_started(&self, name: &str) {
        println!("\n🔧 Executing tool: {}", name);
    }

    fn on_tool_completed(&self, name: &str) {
        println!("{}", format!("✅ Tool completed: {}", name).green());
    }
}

/// Tool-call trace without token output; the shell prints the final answer
/// itself. Used by the REPL when verbose tracing is on.
pub struct ToolTraceObserver;

impl TurnObserver for ToolTraceObserver {
    fn on_tool_started(&self, name: &str) {
        println!("{}", format!("🔧 Volám nástroj: {}...", name).cyan());
    }

    fn on_tool_completed(&self, name: &str) {
        println!("{}", format!("✅ Nástroj dokončen: {}", name).dimmed());
    }
}
