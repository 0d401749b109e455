pub mod activity;
pub mod closeness_tier;
pub mod event;
pub mod friend;
pub mod friend_activity;
pub mod note;
pub mod session;

pub use activity::{Activity, NewActivity, UpdateActivity};
pub use closeness_tier::{ClosenessTier, NewClosenessTier, UpdateClosenessTier};
pub use event::{Event, EventInvitation, NewEvent, NewEventInvitation, UpdateEvent};
pub use friend::{Friend, NewFriend, UpdateFriend};
pub use friend_activity::{FriendActivity, NewFriendActivity};
pub use note::{NewNote, Note, NoteWithLinks, UpdateNote};
pub use session::Session;
