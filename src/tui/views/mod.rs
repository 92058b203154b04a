mod countdown;

pub use countdown::draw_countdown;
