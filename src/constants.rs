/// 每个载体字节只使用最低有效位，因此一个数据字节需要 8 个载体字节。
pub const BYTE_LEN: usize = 8;

/// 当前唯一支持的每字节位数，写入头部的 `bits_used` 字段。
pub const BITS_USED: u8 = 1;

/// 头部起始的标识符，用于判断图像中是否真的藏有数据。
pub const MAGIC: &[u8; 5] = b"STEGS";

/// 头部中数据长度字段的宽度 (字节，小端序)。
pub const DATA_LEN_SIZE: usize = 10;

/// 头部中 `bits_used` 字段的宽度 (字节)。
pub const BITS_USED_SIZE: usize = 1;

/// 头部中文件名长度字段的宽度 (字节，小端序)。
pub const FILE_NAME_LEN_SIZE: usize = 2;

/// 头部固定部分的长度：标识符 + 数据长度 + 位数 + 文件名长度 = 18 字节。
/// 文件名紧随其后，长度可变。
pub const FIXED_HEADER_LEN: usize = MAGIC.len() + DATA_LEN_SIZE + BITS_USED_SIZE + FILE_NAME_LEN_SIZE;

/// 未指定输出路径时，附加在载体文件名后的后缀。
pub const DEFAULT_OUTPUT_SUFFIX: &str = "Steganogrified";

/// 输出图像始终保存为无损的 PNG。
pub const OUTPUT_EXTENSION: &str = "png";

/// 揭示的消息不是合法 UTF-8 时，原始字节写入 `<输入文件名>_message.txt`。
pub const MESSAGE_FALLBACK_SUFFIX: &str = "_message.txt";

/// 头部中的文件名不可用时，揭示出的文件使用此名称。
pub const FALLBACK_FILE_NAME: &str = "revealed.bin";
