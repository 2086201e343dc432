use bookshop_app::{catalog::Catalog, context::AppContext};

#[expect(clippy::print_stdout, reason = "check findings written to stdout")]
pub(crate) fn run(context: &AppContext) -> Result<(), String> {
    let problems = report(&context.catalog);

    if problems.is_empty() {
        println!(
            "all {} activities are well formed",
            context.catalog.activities().count()
        );

        return Ok(());
    }

    for problem in &problems {
        println!("{problem}");
    }

    Err(format!("{} malformed activities", problems.len()))
}

fn report(catalog: &Catalog) -> Vec<String> {
    catalog
        .malformed_activities()
        .into_iter()
        .map(|(kind, id, error)| format!("{kind} {id}: {error}"))
        .collect()
}
