use console::style;
use glmr::gitlab::merge_request::{MergeRequest, MergeRequestState};
use once_cell::sync::Lazy;
use prettytable::{Row, Table};

pub static TABLE_FORMAT: Lazy<prettytable::format::TableFormat> = Lazy::new(|| {
    use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};

    FormatBuilder::new()
        .column_separator(' ')
        .separator(LinePosition::Top, LineSeparator::new('─', ' ', ' ', ' '))
        .separator(LinePosition::Title, LineSeparator::new('─', ' ', ' ', ' '))
        .separator(LinePosition::Intern, LineSeparator::new('┈', ' ', ' ', ' '))
        .separator(LinePosition::Bottom, LineSeparator::new('─', ' ', ' ', ' '))
        .padding(1, 1)
        .build()
});

pub fn new_table(titles: Row) -> Table {
    let mut table = Table::new();
    table.set_format(*TABLE_FORMAT);
    table.set_titles(titles);

    table
}

fn state_mark(mr: &MergeRequest) -> String {
    match mr.state {
        MergeRequestState::Opened if mr.draft => format!("{}", style("◌").dim()),
        MergeRequestState::Opened => format!("{}", style("●").green().bold()),
        MergeRequestState::Merged => format!("{}", style("✓").blue().bold()),
        MergeRequestState::Closed => format!("{}", style("✗").red().bold()),
        MergeRequestState::Locked | MergeRequestState::Unknown => format!("{}", style("?").bold()),
    }
}

pub fn merge_requests(mrs: &[MergeRequest]) -> Table {
    let mut table = new_table(row!["", "mr", "updated", "branches", "title (url)", "author"]);

    for mr in mrs {
        table.add_row(row![
            state_mark(mr),
            mr.reference(),
            mr.updated_at.format("%Y-%m-%d %H:%M"),
            format!("{} → {}", mr.source_branch, mr.target_branch),
            format!(
                "{title}\n{url}",
                title = mr.title,
                url = style(&mr.web_url).blue().underlined(),
            ),
            mr.author.username,
        ]);
    }

    table
}
