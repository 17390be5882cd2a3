use std::fmt;

/// One top-level dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Chats,
    Calls,
    Keylogs,
    Contacts,
    Sms,
    InstalledApps,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Chats,
        Section::Calls,
        Section::Keylogs,
        Section::Contacts,
        Section::Sms,
        Section::InstalledApps,
    ];

    pub const DEFAULT: Section = Section::Chats;

    pub fn id(self) -> &'static str {
        match self {
            Section::Chats => "chats",
            Section::Calls => "calls",
            Section::Keylogs => "keylogs",
            Section::Contacts => "contacts",
            Section::Sms => "sms",
            Section::InstalledApps => "installed_apps",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Chats => "Chats",
            Section::Calls => "Call Logs",
            Section::Keylogs => "Keylogs",
            Section::Contacts => "Contacts",
            Section::Sms => "SMS",
            Section::InstalledApps => "Installed Apps",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            Section::Chats => "chat-symbolic",
            Section::Calls => "call-start-symbolic",
            Section::Keylogs => "input-keyboard-symbolic",
            Section::Contacts => "contact-new-symbolic",
            Section::Sms => "mail-unread-symbolic",
            Section::InstalledApps => "view-app-grid-symbolic",
        }
    }

    pub fn list_path(self) -> &'static str {
        match self {
            Section::Chats => "get_chats",
            Section::Calls => "get_calls",
            Section::Keylogs => "get_keylogs",
            Section::Contacts => "get_contacts",
            Section::Sms => "get_sms",
            Section::InstalledApps => "get_installed_apps",
        }
    }

    pub fn search_path(self) -> &'static str {
        match self {
            Section::Chats => "search_chats",
            Section::Calls => "search_calls",
            Section::Keylogs => "search_keylogs",
            Section::Contacts => "search_contacts",
            Section::Sms => "search_sms",
            Section::InstalledApps => "search_apps",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
