pub const WALL_SYMBOL: char = '#';
pub const ITEM_SYMBOL: char = '$';
pub const SEEKER_SYMBOL: char = 'P';
pub const CHASER_SYMBOL: char = 'G';
pub const EMPTY_SYMBOL: char = '.';

pub const TICK_RATE: u32 = 5;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

pub const LEVEL_ENV_VAR: &str = "PURSUIT_LEVEL";
pub const STRATEGY_ENV_VAR: &str = "PURSUIT_STRATEGY";

pub const DEFAULT_SIM_SESSIONS: usize = 8;
pub const DEFAULT_SIM_MAX_TURNS: u64 = 2_000;

pub const DEFAULT_LEVEL: [&str; 14] = [
    "####################################################",
    "#  #$                        #     #         G#   $#",
    "#  #                    ######     #   ########    #",
    "#              P                                   #",
    "#                                                  #",
    "#                                                  #",
    "#                                    #             #",
    "# #  # #  G                          #             #",
    "# #  # #                             #             #",
    "#$#### #                             #             #",
    "#      #                             ####          #",
    "# ####                                             #",
    "# #  # #                         G                 #",
    "####################################################",
];
