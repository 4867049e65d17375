//! Text rendering for the detail card, the label tables, and the user
//! management page.

use std::fmt::Write;

use atos_core::{Ato, Situacao, TipoAto, format_display};

// ── Detail card ──

/// Render an ato as a vertical card, in the order the ficha page shows it.
pub fn render_ato_card(ato: &Ato) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", ato.titulo);
    let _ = writeln!(out);

    let rows: [(&str, String); 8] = [
        ("Número", ato.numero.clone()),
        ("Ementa", ato.ementa.clone()),
        ("Tipo", ato.tipo_label().to_string()),
        ("Fonte", ato.fonte.clone()),
        ("Situação", ato.situacao_label().to_string()),
        ("Data do ato", date_cell(ato.data_ato)),
        ("Data da publicação", date_cell(ato.data_publicacao)),
        ("Observação", ato.observacao.clone()),
    ];
    for (label, value) in rows {
        write_row(&mut out, label, &value);
    }
    out
}

pub fn print_ato_card(ato: &Ato) {
    print!("{}", render_ato_card(ato));
}

fn date_cell(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_display).unwrap_or_else(|| "-".to_string())
}

/// Multi-line values continue under the value column.
fn write_row(out: &mut String, label: &str, value: &str) {
    let label = format!("{label}:");
    let mut lines = value.lines();
    let first = lines.next().unwrap_or("");
    let _ = writeln!(out, "  {label:<20} {first}");
    for line in lines {
        let _ = writeln!(out, "  {:<20} {line}", "");
    }
}

// ── Label tables ──

pub fn render_label_tables() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tipo");
    for tipo in TipoAto::ALL {
        write_label(&mut out, tipo.value(), tipo.label());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Situação");
    for situacao in Situacao::ALL {
        write_label(&mut out, situacao.value(), situacao.label());
    }
    out
}

fn write_label(out: &mut String, value: &str, label: &str) {
    if value == label {
        let _ = writeln!(out, "  {value}");
    } else {
        let _ = writeln!(out, "  {value}  ({label})");
    }
}

// ── User management ──

pub const SIGN_UP_ROUTE: &str = "/sign-up";

pub fn render_user_management() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Usuários Cadastrados ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "  Novo Usuário: {SIGN_UP_ROUTE}");
    out
}
