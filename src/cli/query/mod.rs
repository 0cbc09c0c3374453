//! Query command - answers one question from the terminal

use clap::Args;

use super::{bootstrap, ConfigArgs};
use crate::domain::{Deadline, DomainError, GenerationMode};

#[derive(Args, Clone, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Answer mode: plain, rag or full
    #[arg(long, default_value = "rag")]
    pub mode: GenerationMode,

    /// The question; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl QueryArgs {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

/// Print the answer, or the refusal when a guardrail blocks
pub async fn run(args: QueryArgs) -> anyhow::Result<()> {
    let config = bootstrap(&args.config)?;

    let context = crate::create_app_context(&config, false).await?;
    let deadline = Deadline::after(config.timeouts.request());

    let result = context
        .answers
        .answer(args.mode, &args.question(), &deadline)
        .await;
    context.shutdown().await;

    match result {
        Ok(answer) => println!("{}", answer),
        Err(DomainError::PolicyRejection { message, .. }) => println!("{}", message),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
