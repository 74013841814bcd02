use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use cram_lib::quiz::QuizResult;

use crate::app::App;
use crate::OutputFormat;

/// Run a quiz over the saved questions, reading answers from stdin.
/// A blank line or anything unparseable counts as unanswered.
pub fn take(app: &App, limit: Option<usize>) -> Result<()> {
    let mut questions = app.store.load_quiz_questions();
    if let Some(limit) = limit {
        questions.truncate(limit);
    }

    if questions.is_empty() {
        println!("No quiz questions. Generate some with: cram generate quiz <file>");
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut selections: Vec<Option<usize>> = Vec::with_capacity(questions.len());

    for (i, q) in questions.iter().enumerate() {
        println!("Question {}/{}: {}", i + 1, questions.len(), q.question);
        for (j, option) in q.options.iter().enumerate() {
            println!("  {}. {}", j + 1, option);
        }
        print!("Answer (1-{}, blank to skip): ", q.options.len());
        std::io::stdout().flush()?;

        // EOF means the remaining questions go unanswered.
        let selected = match lines.next() {
            Some(line) => {
                let line = line?;
                line.trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=q.options.len()).contains(n))
                    .map(|n| n - 1)
            }
            None => None,
        };
        selections.push(selected);
        println!();
    }

    let result = QuizResult::grade(&questions, &selections);

    let mut results = app.store.load_quiz_results();
    results.push(result.clone());
    app.store
        .save_quiz_results(&results)
        .context("Failed to save quiz result")?;

    println!("Score: {}/{}", result.score, result.total);
    for (answer, q) in result.answers.iter().zip(&questions) {
        if !answer.correct {
            println!();
            println!("Missed: {}", q.question);
            println!("  Correct: {}", q.options[q.correct_answer]);
            println!("  {}", q.explanation);
        }
    }

    Ok(())
}

pub fn results(app: &App, format: &OutputFormat) -> Result<()> {
    let results = app.store.load_quiz_results();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Plain => {
            if results.is_empty() {
                println!("No quiz attempts yet.");
                return Ok(());
            }
            for r in &results {
                let unanswered = r.answers.iter().filter(|a| a.selected.is_none()).count();
                println!(
                    "{}  {}/{} ({} unanswered)",
                    r.completed_at.format("%Y-%m-%d %H:%M"),
                    r.score,
                    r.total,
                    unanswered
                );
            }
        }
    }

    Ok(())
}

pub fn questions(app: &App, show_answers: bool) -> Result<()> {
    let questions = app.store.load_quiz_questions();
    if questions.is_empty() {
        println!("No quiz questions. Generate some with: cram generate quiz <file>");
        return Ok(());
    }

    for q in &questions {
        println!("{}  {}", q.id, q.question);
        for (i, option) in q.options.iter().enumerate() {
            let marker = if show_answers && i == q.correct_answer { " *" } else { "" };
            println!("  {}. {}{}", i + 1, option, marker);
        }
        if show_answers && !q.explanation.is_empty() {
            println!("  ({})", q.explanation);
        }
        println!();
    }

    Ok(())
}
