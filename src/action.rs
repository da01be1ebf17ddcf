use crate::types::{Ticket, TicketPage};

/// State transitions understood by [`crate::app::App::update`].
#[derive(Debug, Clone)]
pub enum Action {
    Quit,

    // Table cursor (presentation only)
    CursorUp,
    CursorDown,

    // Listing
    LoadPage(u32),
    NextPage,
    PrevPage,
    Refresh,

    // Search input
    EnterSearch,
    ExitSearch,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    ClearSearch,

    // Fetch completions, tagged with the request sequence number
    PageLoaded { page: TicketPage, load_id: u64 },
    PageFailed { message: String, load_id: u64 },
    LookupLoaded { ticket: Box<Ticket>, load_id: u64 },
    LookupFailed { message: String, load_id: u64 },

    None,
}
