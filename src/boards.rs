//! Pin presets for known HUB75 controller boards

use crate::config::Pins;

/// Named pin assignment of a controller board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    /// Lower-case preset name
    pub name: &'static str,
    /// Connector pin assignment
    pub pins: Pins,
}

impl Board {
    /// Look up a preset by name, ignoring ASCII case
    ///
    /// ## Example
    ///
    /// ```
    /// use hub75_canvas::boards::Board;
    ///
    /// let board = Board::by_name("ESP32-Trinity");
    /// assert_eq!(board.map(|b| b.pins.clk), Some(16));
    /// assert!(Board::by_name("unknown").is_none());
    /// ```
    pub fn by_name(name: &str) -> Option<&'static Self> {
        BOARDS
            .iter()
            .find(|board| board.name.eq_ignore_ascii_case(name))
    }
}

/// Adafruit Matrix Portal S3
pub const ADAFRUIT_MATRIX_PORTAL_S3: Board = Board {
    name: "adafruit-matrix-portal-s3",
    pins: Pins {
        r1: 42,
        g1: 41,
        b1: 40,
        r2: 38,
        g2: 39,
        b2: 37,
        a: 45,
        b: 36,
        c: 48,
        d: 35,
        e: Some(21),
        lat: 47,
        oe: 14,
        clk: 2,
    },
};

/// Apollo Automation M1 rev 4
pub const APOLLO_AUTOMATION_M1_REV4: Board = Board {
    name: "apollo-automation-m1-rev4",
    pins: Pins {
        r1: 42,
        g1: 41,
        b1: 40,
        r2: 38,
        g2: 39,
        b2: 37,
        a: 45,
        b: 36,
        c: 48,
        d: 35,
        e: Some(21),
        lat: 47,
        oe: 14,
        clk: 2,
    },
};

/// Apollo Automation M1 rev 6
pub const APOLLO_AUTOMATION_M1_REV6: Board = Board {
    name: "apollo-automation-m1-rev6",
    pins: Pins {
        r1: 1,
        g1: 5,
        b1: 6,
        r2: 7,
        g2: 13,
        b2: 9,
        a: 16,
        b: 48,
        c: 47,
        d: 21,
        e: Some(38),
        lat: 8,
        oe: 4,
        clk: 18,
    },
};

/// ESP32 Trinity
pub const ESP32_TRINITY: Board = Board {
    name: "esp32-trinity",
    pins: Pins {
        r1: 25,
        g1: 26,
        b1: 27,
        r2: 14,
        g2: 12,
        b2: 13,
        a: 23,
        b: 19,
        c: 5,
        d: 17,
        e: Some(18),
        lat: 4,
        oe: 15,
        clk: 16,
    },
};

/// Huidu HD-WF2
// TODO: confirm the E pin against a 64 px high panel on real hardware.
pub const HUIDU_HD_WF2: Board = Board {
    name: "huidu-hd-wf2",
    pins: Pins {
        r1: 2,
        g1: 6,
        b1: 10,
        r2: 3,
        g2: 7,
        b2: 11,
        a: 39,
        b: 38,
        c: 37,
        d: 36,
        e: Some(21),
        lat: 33,
        oe: 35,
        clk: 34,
    },
};

/// Every known preset
pub const BOARDS: &[Board] = &[
    ADAFRUIT_MATRIX_PORTAL_S3,
    APOLLO_AUTOMATION_M1_REV4,
    APOLLO_AUTOMATION_M1_REV6,
    ESP32_TRINITY,
    HUIDU_HD_WF2,
];
