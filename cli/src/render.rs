use std::fmt;

use todo_core::{Filter, TodoList};

/// Render the current page of the list as plain text.
pub fn render(view: &TodoList) -> String {
    Page(view).to_string()
}

struct Page<'a>(&'a TodoList);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let filter = match view.filter() {
            Filter::All => String::new(),
            other => format!(" [{}]", other.label()),
        };
        writeln!(f, "My To-Do List{filter}")?;

        let page = view.current_page();
        if page.is_empty() {
            writeln!(f, "  No tasks yet")?;
        }
        for todo in page {
            let mark = if todo.completed { 'x' } else { ' ' };
            writeln!(f, "  [{mark}] #{} {}", todo.id, todo.title)?;
            if !todo.description.is_empty() {
                writeln!(f, "        {}", todo.description)?;
            }
        }

        let total = view.total_pages();
        if total > 1 {
            writeln!(f, "  page {}/{total}", view.page())?;
        }

        if let Some(draft) = view.editing() {
            writeln!(
                f,
                "editing #{}: title={:?} description={:?} (save/cancel)",
                draft.id, draft.title, draft.description
            )?;
        }
        Ok(())
    }
}
