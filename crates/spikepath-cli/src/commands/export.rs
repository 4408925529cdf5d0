//! Print the board network as interchange text

use clap::Args;

use spikepath_board::BoardNetwork;

use crate::commands::BoardArgs;
use crate::error::CliResult;

/// Print the board network as interchange text
#[derive(Args, Debug)]
pub struct ExportCommand {
    #[command(flatten)]
    pub board: BoardArgs,
}

impl ExportCommand {
    /// Execute the export command
    pub fn execute(self) -> CliResult<()> {
        let board = self.board.to_board()?;
        let encoded = BoardNetwork::build(&board)?;
        print!("{}", encoded.to_text());
        Ok(())
    }
}
