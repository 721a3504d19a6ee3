//! One function per subcommand. Each goes through [`ExpenseBook`] so the
//! terminal sees the same validation and ordering as any other front end.

use client::{
    ApiClient, Category, Expense, ExpenseApi, ExpenseBook, ExpenseForm, Field, FormErrors,
    Notice, format_amount, format_date,
};

use crate::{
    cli::{Command, EditArgs},
    error::{CliError, Result},
};

pub async fn run(api: &ApiClient, command: Command) -> Result<()> {
    match command {
        Command::List { category } => list(api, category.as_deref()).await,
        Command::Show { id } => {
            let expense = api.get(&id).await?;
            println!("{}", render_detail(&expense));
            Ok(())
        }
        Command::Add {
            title,
            amount,
            category,
            date,
            notes,
        } => {
            let form = ExpenseForm {
                title,
                amount,
                category,
                date,
                notes,
                ..ExpenseForm::default()
            };
            add(api, form).await
        }
        Command::Edit { id, changes } => edit(api, &id, changes).await,
        Command::Delete { id } => {
            let mut book = ExpenseBook::new();
            let notice = book.delete(api, &id).await;
            report(notice)
        }
        Command::Total => {
            let book = loaded_book(api).await?;
            println!(
                "{} across {} expenses",
                format_amount(book.total()),
                book.expenses().len()
            );
            Ok(())
        }
        Command::Categories => {
            for category in Category::ALL {
                println!("{category}");
            }
            Ok(())
        }
    }
}

async fn loaded_book<A: ExpenseApi>(api: &A) -> Result<ExpenseBook> {
    let mut book = ExpenseBook::new();
    match book.load(api).await {
        Some(notice) => Err(CliError::Rejected(notice.message)),
        None => Ok(book),
    }
}

async fn list<A: ExpenseApi>(api: &A, category: Option<&str>) -> Result<()> {
    let filter = category
        .map(Category::try_from)
        .transpose()
        .map_err(CliError::InvalidInput)?;

    let book = loaded_book(api).await?;
    let shown: Vec<&Expense> = book
        .expenses()
        .iter()
        .filter(|expense| filter.is_none_or(|category| expense.category == category))
        .collect();

    if shown.is_empty() {
        println!("No expenses yet.");
        return Ok(());
    }
    for expense in &shown {
        println!("{}", render_row(expense));
    }
    let total: f64 = shown.iter().map(|expense| expense.amount).sum();
    println!("Total: {}", format_amount(total));
    Ok(())
}

async fn add<A: ExpenseApi>(api: &A, form: ExpenseForm) -> Result<()> {
    let mut book = ExpenseBook::new();
    book.form = form;
    let notice = submit(&mut book, api).await?;
    report(notice)?;
    if let Some(created) = book.expenses().first() {
        println!("{}", render_row(created));
    }
    Ok(())
}

async fn edit<A: ExpenseApi>(api: &A, id: &str, changes: EditArgs) -> Result<()> {
    let mut book = loaded_book(api).await?;
    if !book.start_edit(id) {
        return Err(CliError::NotFound(id.to_string()));
    }
    apply_edits(&mut book.form, changes);

    let notice = submit(&mut book, api).await?;
    report(notice)?;
    if let Some(updated) = book.find(id) {
        println!("{}", render_row(updated));
    }
    Ok(())
}

fn apply_edits(form: &mut ExpenseForm, changes: EditArgs) {
    let EditArgs {
        title,
        amount,
        category,
        date,
        notes,
    } = changes;
    if let Some(title) = title {
        form.title = title;
    }
    if let Some(amount) = amount {
        form.amount = amount;
    }
    if let Some(category) = category {
        form.category = category;
    }
    if let Some(date) = date {
        form.date = date;
    }
    if let Some(notes) = notes {
        form.notes = notes;
    }
}

async fn submit<A: ExpenseApi>(book: &mut ExpenseBook, api: &A) -> Result<Notice> {
    match book.submit(api).await {
        Some(notice) => Ok(notice),
        None => Err(CliError::InvalidInput(render_form_errors(&book.form.errors))),
    }
}

fn report(notice: Notice) -> Result<()> {
    if notice.is_error() {
        return Err(CliError::Rejected(notice.message));
    }
    println!("{}", notice.message);
    Ok(())
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Title => "title",
        Field::Amount => "amount",
        Field::Category => "category",
        Field::Date => "date",
    }
}

fn render_form_errors(errors: &FormErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field_name(*field), message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_row(expense: &Expense) -> String {
    format!(
        "{:<36}  {:<12}  {:>12}  {:<17}  {}",
        expense.id,
        format_date(&expense.date),
        format_amount(expense.amount),
        expense.category.as_str(),
        expense.title
    )
}

fn render_detail(expense: &Expense) -> String {
    let mut out = format!(
        "{}\n  id:       {}\n  amount:   {}\n  category: {}\n  date:     {}",
        expense.title,
        expense.id,
        format_amount(expense.amount),
        expense.category,
        format_date(&expense.date)
    );
    if !expense.notes.is_empty() {
        out.push_str(&format!("\n  notes:    {}", expense.notes));
    }
    out
}
